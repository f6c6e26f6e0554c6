//! Takeoff queries

use common::TenantId;

use crate::domain::entities::TakeoffItemFilter;
use crate::domain::value_objects::{DrawingId, ProjectId};

/// 图纸台账列表查询
#[derive(Debug, Clone)]
pub struct ListTakeoffItemsQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
    pub filter: TakeoffItemFilter,
}

/// 单图纸汇总查询
#[derive(Debug, Clone)]
pub struct GetDrawingRollupQuery {
    pub tenant_id: TenantId,
    pub drawing_id: DrawingId,
}

/// 整项目汇总查询
#[derive(Debug, Clone)]
pub struct GetProjectRollupQuery {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
}

/// 公司材料目录列表查询（选料器用，目录本身只读）
#[derive(Debug, Clone)]
pub struct ListMaterialsQuery {
    pub tenant_id: TenantId,
    pub category: Option<String>,
    pub active_only: bool,
}
