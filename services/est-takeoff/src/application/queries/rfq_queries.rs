//! RFQ queries

use common::TenantId;

use crate::domain::value_objects::{ProjectId, RfqId};

/// 项目询价单列表查询
#[derive(Debug, Clone)]
pub struct ListRfqsQuery {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
}

/// 询价单详情查询（连同行）
#[derive(Debug, Clone)]
pub struct GetRfqQuery {
    pub tenant_id: TenantId,
    pub rfq_id: RfqId,
}
