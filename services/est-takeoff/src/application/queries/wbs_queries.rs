//! WBS queries

use common::TenantId;

use crate::domain::value_objects::{ProjectId, WbsCategoryId};

/// 项目分类平面列表查询
#[derive(Debug, Clone)]
pub struct ListWbsCategoriesQuery {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
}

/// 项目分类树查询
#[derive(Debug, Clone)]
pub struct GetWbsTreeQuery {
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
}

/// 分类完整路径查询
#[derive(Debug, Clone)]
pub struct GetWbsPathQuery {
    pub tenant_id: TenantId,
    pub category_id: WbsCategoryId,
}
