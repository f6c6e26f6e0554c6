//! 测量方式枚举

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ServiceError;

/// 测量方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// 长度测量（像素长度经比例尺换算）
    #[default]
    Length,
    /// 计数（与比例尺无关）
    Count,
}

impl MeasurementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Count => "count",
        }
    }

    /// 是否需要比例尺换算
    pub fn is_scale_dependent(&self) -> bool {
        matches!(self, Self::Length)
    }
}

impl FromStr for MeasurementKind {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "length" => Ok(Self::Length),
            "count" => Ok(Self::Count),
            other => Err(ServiceError::Validation(format!(
                "测量方式无效: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
