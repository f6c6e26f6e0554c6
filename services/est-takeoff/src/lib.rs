//! est-takeoff - 工程量计算引擎
//!
//! 图纸测量换算、WBS 分类树、工程量汇总与询价单组装

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
