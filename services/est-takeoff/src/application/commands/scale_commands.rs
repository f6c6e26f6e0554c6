//! Scale commands

use common::{TenantId, UserId};

use crate::domain::value_objects::{
    CustomScaleId, DrawingId, ProjectId, ScaleRef, ScaleZoneId, ZoneRect,
};
use crate::error::{ServiceError, ServiceResult};

/// 名称字段最大长度
const MAX_NAME_LENGTH: usize = 100;

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("名称不能为空".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ServiceError::Validation(format!(
            "名称长度不能超过{}个字符",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_pixels_per_unit(pixels_per_unit: f64) -> ServiceResult<()> {
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
        return Err(ServiceError::Validation(format!(
            "像素比必须为正数: {}",
            pixels_per_unit
        )));
    }
    Ok(())
}

/// 创建自定义比例尺命令
#[derive(Debug, Clone)]
pub struct CreateCustomScaleCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub name: String,
    pub pixels_per_unit: f64,
    /// 缺省时取配置的默认单位
    pub unit: Option<String>,
}

impl CreateCustomScaleCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        validate_name(&self.name)?;
        validate_pixels_per_unit(self.pixels_per_unit)?;
        Ok(())
    }
}

/// 删除自定义比例尺命令
#[derive(Debug, Clone)]
pub struct DeleteCustomScaleCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub scale_id: CustomScaleId,
}

/// 设置页面默认比例尺命令（upsert 语义）
#[derive(Debug, Clone)]
pub struct SetPageScaleCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
    pub scale: ScaleRef,
}

impl SetPageScaleCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.page_number < 1 {
            return Err(ServiceError::Validation(format!(
                "页码必须从 1 开始: {}",
                self.page_number
            )));
        }
        Ok(())
    }
}

/// 创建比例尺区域命令
#[derive(Debug, Clone)]
pub struct CreateScaleZoneCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
    pub name: String,
    pub rect: ZoneRect,
    pub scale: ScaleRef,
}

impl CreateScaleZoneCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.page_number < 1 {
            return Err(ServiceError::Validation(format!(
                "页码必须从 1 开始: {}",
                self.page_number
            )));
        }
        validate_name(&self.name)?;
        Ok(())
    }
}

/// 更新比例尺区域命令（只写提供的字段，先整体校验）
#[derive(Debug, Clone)]
pub struct UpdateScaleZoneCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub zone_id: ScaleZoneId,
    pub name: Option<String>,
    pub rect: Option<ZoneRect>,
    pub scale: Option<ScaleRef>,
}

impl UpdateScaleZoneCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// 删除比例尺区域命令
#[derive(Debug, Clone)]
pub struct DeleteScaleZoneCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub zone_id: ScaleZoneId,
}

/// 标定命令
///
/// persist_as 提供名称时把结果保存为项目自定义比例尺，
/// 这是标定唯一的副作用路径
#[derive(Debug, Clone)]
pub struct CalibrateScaleCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub drawing_id: DrawingId,
    pub pixel_distance: f64,
    pub real_distance: f64,
    pub unit: Option<String>,
    pub persist_as: Option<String>,
}

impl CalibrateScaleCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(name) = &self.persist_as {
            validate_name(name)?;
        }
        // 距离本身的正数校验交给标定函数（InvalidCalibration）
        Ok(())
    }
}
