//! 页面默认比例尺实体

use common::AuditInfo;
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DrawingId, PageScaleId, ScaleRef};
use crate::error::{ServiceError, ServiceResult};

/// 页面默认比例尺
///
/// (图纸, 页码) 至多一条；重复设置按 upsert 语义覆盖旧值。
/// 区域比例尺优先于页面默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageScale {
    /// 页面比例尺 ID
    id: PageScaleId,
    /// 所属图纸 ID
    drawing_id: DrawingId,
    /// 页码（从 1 开始）
    page_number: i32,
    /// 比例尺引用
    scale: ScaleRef,
    /// 显示名称（设置时解析固化）
    scale_name: String,
    /// 每真实单位对应的像素数（设置时解析固化）
    pixels_per_unit: f64,
    /// 审计信息
    audit_info: AuditInfo,
}

impl PageScale {
    /// 设置页面默认比例尺
    pub fn new(
        drawing_id: DrawingId,
        page_number: i32,
        scale: ScaleRef,
        scale_name: impl Into<String>,
        pixels_per_unit: f64,
    ) -> ServiceResult<Self> {
        if page_number < 1 {
            return Err(ServiceError::Validation(format!(
                "页码必须从 1 开始: {}",
                page_number
            )));
        }
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            return Err(ServiceError::Validation(format!(
                "像素比必须为正数: {}",
                pixels_per_unit
            )));
        }

        Ok(Self {
            id: PageScaleId::new(),
            drawing_id,
            page_number,
            scale,
            scale_name: scale_name.into(),
            pixels_per_unit,
            audit_info: AuditInfo::default(),
        })
    }

    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: PageScaleId,
        drawing_id: DrawingId,
        page_number: i32,
        scale: ScaleRef,
        scale_name: String,
        pixels_per_unit: f64,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            drawing_id,
            page_number,
            scale,
            scale_name,
            pixels_per_unit,
            audit_info,
        }
    }

    pub fn id(&self) -> &PageScaleId {
        &self.id
    }

    pub fn drawing_id(&self) -> &DrawingId {
        &self.drawing_id
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn scale(&self) -> &ScaleRef {
        &self.scale
    }

    pub fn scale_name(&self) -> &str {
        &self.scale_name
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }
}

impl Entity for PageScale {
    type Id = PageScaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for PageScale {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
