//! 询价单聚合根

use chrono::{DateTime, Utc};
use common::AuditInfo;
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::enums::RfqStatus;
use crate::domain::value_objects::{MaterialId, ProjectId, RfqId, RfqLineId, RfqNumber};
use crate::error::{ServiceError, ServiceResult};

/// 询价单
///
/// 面向供应商的汇总量快照。行在组装时固化，
/// 后续台账编辑不回溯已出具的询价单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    /// 询价单 ID
    id: RfqId,
    /// 所属项目 ID
    project_id: ProjectId,
    /// 询价单编号（项目内唯一）
    rfq_number: RfqNumber,
    /// 供应商名称
    supplier_name: Option<String>,
    /// 供应商邮箱
    supplier_email: Option<String>,
    /// 供应商电话
    supplier_phone: Option<String>,
    /// 备注
    note: Option<String>,
    /// 状态
    status: RfqStatus,
    /// 首次发送时间（只盖一次章）
    sent_at: Option<DateTime<Utc>>,
    /// 审计信息
    audit_info: AuditInfo,
}

impl Rfq {
    /// 创建询价单（初始为草稿）
    pub fn new(project_id: ProjectId, rfq_number: RfqNumber) -> Self {
        Self {
            id: RfqId::new(),
            project_id,
            rfq_number,
            supplier_name: None,
            supplier_email: None,
            supplier_phone: None,
            note: None,
            status: RfqStatus::Draft,
            sent_at: None,
            audit_info: AuditInfo::default(),
        }
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: RfqId,
        project_id: ProjectId,
        rfq_number: RfqNumber,
        supplier_name: Option<String>,
        supplier_email: Option<String>,
        supplier_phone: Option<String>,
        note: Option<String>,
        status: RfqStatus,
        sent_at: Option<DateTime<Utc>>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            project_id,
            rfq_number,
            supplier_name,
            supplier_email,
            supplier_phone,
            note,
            status,
            sent_at,
            audit_info,
        }
    }

    pub fn id(&self) -> &RfqId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn rfq_number(&self) -> &RfqNumber {
        &self.rfq_number
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn supplier_email(&self) -> Option<&str> {
        self.supplier_email.as_deref()
    }

    pub fn supplier_phone(&self) -> Option<&str> {
        self.supplier_phone.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn status(&self) -> RfqStatus {
        self.status
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    // ========== Setters (Builder pattern) ==========

    pub fn with_supplier(
        mut self,
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        self.supplier_name = name;
        self.supplier_email = email;
        self.supplier_phone = phone;
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    // ========== 状态管理 ==========

    /// 流转状态
    ///
    /// Draft -> Sent -> Closed 单向；显式重置回 Draft 允许。
    /// 首次进入 Sent 时盖发送时间章，之后不再覆盖
    pub fn set_status(&mut self, next: RfqStatus) -> ServiceResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(ServiceError::InvalidStatusTransition(format!(
                "询价单不允许从 {} 流转到 {}",
                self.status, next
            )));
        }

        if next == RfqStatus::Sent && self.sent_at.is_none() {
            self.sent_at = Some(Utc::now());
        }

        self.status = next;
        self.audit_info.update(None);
        Ok(())
    }
}

impl Entity for Rfq {
    type Id = RfqId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Rfq {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 询价单行（组装时的点时快照）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqLine {
    /// 行 ID
    id: RfqLineId,
    /// 所属询价单 ID
    rfq_id: RfqId,
    /// 材料 ID
    material_id: MaterialId,
    /// 数量
    quantity: f64,
    /// 计量单位
    unit: String,
    /// 备注
    note: Option<String>,
}

impl RfqLine {
    pub fn new(
        rfq_id: RfqId,
        material_id: MaterialId,
        quantity: f64,
        unit: impl Into<String>,
        note: Option<String>,
    ) -> ServiceResult<Self> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ServiceError::InvalidQuantity(format!(
                "数量必须为非负数: {}",
                quantity
            )));
        }

        Ok(Self {
            id: RfqLineId::new(),
            rfq_id,
            material_id,
            quantity,
            unit: unit.into(),
            note,
        })
    }

    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: RfqLineId,
        rfq_id: RfqId,
        material_id: MaterialId,
        quantity: f64,
        unit: String,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            rfq_id,
            material_id,
            quantity,
            unit,
            note,
        }
    }

    pub fn id(&self) -> &RfqLineId {
        &self.id
    }

    pub fn rfq_id(&self) -> &RfqId {
        &self.rfq_id
    }

    pub fn material_id(&self) -> &MaterialId {
        &self.material_id
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_rfq() -> Rfq {
        Rfq::new(ProjectId::new(), RfqNumber::new("RFQ-001").unwrap())
    }

    #[test]
    fn test_send_stamps_once() {
        let mut rfq = draft_rfq();
        rfq.set_status(RfqStatus::Sent).unwrap();
        let first = rfq.sent_at().unwrap();

        // 重复发送幂等，不覆盖时间章
        rfq.set_status(RfqStatus::Sent).unwrap();
        assert_eq!(rfq.sent_at().unwrap(), first);
    }

    #[test]
    fn test_draft_cannot_close() {
        let mut rfq = draft_rfq();
        let result = rfq.set_status(RfqStatus::Closed);
        assert!(matches!(
            result,
            Err(ServiceError::InvalidStatusTransition(_))
        ));
        assert_eq!(rfq.status(), RfqStatus::Draft);
    }

    #[test]
    fn test_reset_keeps_sent_at() {
        let mut rfq = draft_rfq();
        rfq.set_status(RfqStatus::Sent).unwrap();
        let stamp = rfq.sent_at().unwrap();

        rfq.set_status(RfqStatus::Draft).unwrap();
        assert_eq!(rfq.status(), RfqStatus::Draft);
        assert_eq!(rfq.sent_at().unwrap(), stamp);
    }
}
