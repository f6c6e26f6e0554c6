//! Scale queries

use common::TenantId;

use crate::domain::enums::ScaleFamily;
use crate::domain::value_objects::{DrawingId, PagePoint, ProjectId};

/// 标准比例尺列表查询
#[derive(Debug, Clone, Default)]
pub struct ListStandardScalesQuery {
    pub family: Option<ScaleFamily>,
}

/// 项目自定义比例尺列表查询
#[derive(Debug, Clone)]
pub struct ListCustomScalesQuery {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
}

/// 页面默认比例尺查询
#[derive(Debug, Clone)]
pub struct GetPageScaleQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
}

/// 页面比例尺区域列表查询
#[derive(Debug, Clone)]
pub struct ListScaleZonesQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
}

/// 比例尺解析查询
///
/// point 缺省时只看页面默认值
#[derive(Debug, Clone)]
pub struct ResolveScaleQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
    pub point: Option<PagePoint>,
}

/// 长度测量换算查询
///
/// 在线段中点处解析比例尺，把像素长度换算为真实长度
#[derive(Debug, Clone)]
pub struct ConvertMeasurementQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
    pub start: PagePoint,
    pub end: PagePoint,
}
