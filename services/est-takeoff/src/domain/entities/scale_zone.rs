//! 比例尺区域实体

use common::AuditInfo;
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DrawingId, PagePoint, ScaleRef, ScaleZoneId, ZoneRect};
use crate::error::{ServiceError, ServiceResult};

/// 比例尺区域
///
/// 页面上携带独立比例尺的矩形，覆盖页面默认值。
/// 同页区域允许重叠，解析时最小面积者优先
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleZone {
    /// 区域 ID
    id: ScaleZoneId,
    /// 所属图纸 ID
    drawing_id: DrawingId,
    /// 页码（从 1 开始）
    page_number: i32,
    /// 区域名称
    name: String,
    /// 矩形（页面像素空间）
    rect: ZoneRect,
    /// 比例尺引用
    scale: ScaleRef,
    /// 显示名称（设置时解析固化）
    scale_name: String,
    /// 每真实单位对应的像素数（设置时解析固化）
    pixels_per_unit: f64,
    /// 审计信息
    audit_info: AuditInfo,
}

impl ScaleZone {
    /// 创建比例尺区域
    pub fn new(
        drawing_id: DrawingId,
        page_number: i32,
        name: impl Into<String>,
        rect: ZoneRect,
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
        Self::validate_rect(&rect)?;
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            return Err(ServiceError::Validation(format!(
                "像素比必须为正数: {}",
                pixels_per_unit
            )));
        }

        Ok(Self {
            id: ScaleZoneId::new(),
            drawing_id,
            page_number,
            name: name.into(),
            rect,
            scale,
            scale_name: scale_name.into(),
            pixels_per_unit,
            audit_info: AuditInfo::default(),
        })
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ScaleZoneId,
        drawing_id: DrawingId,
        page_number: i32,
        name: String,
        rect: ZoneRect,
        scale: ScaleRef,
        scale_name: String,
        pixels_per_unit: f64,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            drawing_id,
            page_number,
            name,
            rect,
            scale,
            scale_name,
            pixels_per_unit,
            audit_info,
        }
    }

    fn validate_rect(rect: &ZoneRect) -> ServiceResult<()> {
        let finite = rect.x.is_finite()
            && rect.y.is_finite()
            && rect.width.is_finite()
            && rect.height.is_finite();
        if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ServiceError::Validation(
                "区域矩形的宽高必须为正数".to_string(),
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &ScaleZoneId {
        &self.id
    }

    pub fn drawing_id(&self) -> &DrawingId {
        &self.drawing_id
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> &ZoneRect {
        &self.rect
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

    /// 点是否落在本区域内
    pub fn contains(&self, point: &PagePoint) -> bool {
        self.rect.contains(point)
    }

    /// 区域面积（重叠时最小面积优先）
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    // ========== 更新 ==========

    /// 更新区域名称
    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.audit_info.update(None);
    }

    /// 更新矩形
    pub fn update_rect(&mut self, rect: ZoneRect) -> ServiceResult<()> {
        Self::validate_rect(&rect)?;
        self.rect = rect;
        self.audit_info.update(None);
        Ok(())
    }

    /// 更新比例尺引用及其固化值
    pub fn update_scale(
        &mut self,
        scale: ScaleRef,
        scale_name: impl Into<String>,
        pixels_per_unit: f64,
    ) -> ServiceResult<()> {
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            return Err(ServiceError::Validation(format!(
                "像素比必须为正数: {}",
                pixels_per_unit
            )));
        }
        self.scale = scale;
        self.scale_name = scale_name.into();
        self.pixels_per_unit = pixels_per_unit;
        self.audit_info.update(None);
        Ok(())
    }
}

impl Entity for ScaleZone {
    type Id = ScaleZoneId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for ScaleZone {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
