//! RFQ commands

use common::{TenantId, UserId};

use crate::domain::enums::RfqStatus;
use crate::domain::value_objects::{MaterialId, ProjectId, RfqId, RfqNumber};
use crate::error::{ServiceError, ServiceResult};

/// 询价单行入参（组装时固化为快照）
#[derive(Debug, Clone)]
pub struct RfqLineInput {
    pub material_id: MaterialId,
    pub quantity: f64,
    pub unit: String,
    pub note: Option<String>,
}

impl RfqLineInput {
    pub fn validate(&self) -> ServiceResult<()> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(ServiceError::InvalidQuantity(format!(
                "数量必须为非负数: {}",
                self.quantity
            )));
        }
        if self.unit.trim().is_empty() {
            return Err(ServiceError::Validation(
                "计量单位不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

/// 创建询价单命令（连同初始行集）
#[derive(Debug, Clone)]
pub struct CreateRfqCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub rfq_number: String,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub note: Option<String>,
    pub lines: Vec<RfqLineInput>,
}

impl CreateRfqCommand {
    pub fn validate(&self) -> ServiceResult<RfqNumber> {
        let rfq_number = RfqNumber::new(self.rfq_number.clone())
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        for line in &self.lines {
            line.validate()?;
        }
        Ok(rfq_number)
    }
}

/// 追加询价单行命令
#[derive(Debug, Clone)]
pub struct AddRfqLineCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub rfq_id: RfqId,
    pub line: RfqLineInput,
}

impl AddRfqLineCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        self.line.validate()
    }
}

/// 设置询价单状态命令
#[derive(Debug, Clone)]
pub struct SetRfqStatusCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub rfq_id: RfqId,
    pub status: RfqStatus,
}
