//! Takeoff commands

use common::{TenantId, UserId};

use crate::domain::entities::TakeoffItemPatch;
use crate::domain::enums::MeasurementKind;
use crate::domain::value_objects::{DrawingId, MaterialId, TakeoffItemId, WbsCategoryId};
use crate::error::{ServiceError, ServiceResult};

/// 创建工程量条目命令
#[derive(Debug, Clone)]
pub struct CreateTakeoffItemCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub drawing_id: DrawingId,
    pub page_number: i32,
    pub material_id: MaterialId,
    pub wbs_category_id: Option<WbsCategoryId>,
    pub quantity: f64,
    /// 缺省为 1.0
    pub multiplier: Option<f64>,
    pub kind: MeasurementKind,
    pub note: Option<String>,
}

impl CreateTakeoffItemCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.page_number < 1 {
            return Err(ServiceError::Validation(format!(
                "页码必须从 1 开始: {}",
                self.page_number
            )));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(ServiceError::InvalidQuantity(format!(
                "数量必须为非负数: {}",
                self.quantity
            )));
        }
        if let Some(multiplier) = self.multiplier {
            if !multiplier.is_finite() || multiplier < 0.0 {
                return Err(ServiceError::InvalidQuantity(format!(
                    "系数必须为非负数: {}",
                    multiplier
                )));
            }
        }
        Ok(())
    }
}

/// 更新工程量条目命令
#[derive(Debug, Clone)]
pub struct UpdateTakeoffItemCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub item_id: TakeoffItemId,
    pub patch: TakeoffItemPatch,
}

impl UpdateTakeoffItemCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.patch.is_empty() {
            return Err(ServiceError::Validation(
                "没有需要更新的字段".to_string(),
            ));
        }
        self.patch.validate()
    }
}

/// 删除工程量条目命令
#[derive(Debug, Clone)]
pub struct DeleteTakeoffItemCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub item_id: TakeoffItemId,
}
