//! 自定义比例尺实体

use common::AuditInfo;
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomScaleId, ProjectId};
use crate::error::{ServiceError, ServiceResult};

/// 自定义比例尺
///
/// 项目私有，由标定或直接录入产生。名称不要求唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomScale {
    /// 比例尺 ID
    id: CustomScaleId,
    /// 所属项目 ID
    project_id: ProjectId,
    /// 显示名称
    name: String,
    /// 每真实单位对应的像素数
    pixels_per_unit: f64,
    /// 真实单位标签
    unit: String,
    /// 审计信息
    audit_info: AuditInfo,
}

impl CustomScale {
    /// 创建自定义比例尺
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        pixels_per_unit: f64,
        unit: impl Into<String>,
    ) -> ServiceResult<Self> {
        if !(pixels_per_unit.is_finite() && pixels_per_unit > 0.0) {
            return Err(ServiceError::Validation(format!(
                "像素比必须为正数: {}",
                pixels_per_unit
            )));
        }

        Ok(Self {
            id: CustomScaleId::new(),
            project_id,
            name: name.into(),
            pixels_per_unit,
            unit: unit.into(),
            audit_info: AuditInfo::default(),
        })
    }

    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: CustomScaleId,
        project_id: ProjectId,
        name: String,
        pixels_per_unit: f64,
        unit: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            project_id,
            name,
            pixels_per_unit,
            unit,
            audit_info,
        }
    }

    pub fn id(&self) -> &CustomScaleId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }
}

impl Entity for CustomScale {
    type Id = CustomScaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for CustomScale {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
