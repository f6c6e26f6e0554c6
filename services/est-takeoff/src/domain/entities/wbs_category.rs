//! WBS 分类实体

use common::AuditInfo;
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProjectId, WbsCategoryId};
use crate::error::{ServiceError, ServiceResult};

/// WBS 分类节点
///
/// 项目私有的任意深度分类树。父引用为空表示根节点；
/// 父子必须属于同一项目，保证树不跨项目、不成环
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsCategory {
    /// 分类 ID
    id: WbsCategoryId,
    /// 所属项目 ID
    project_id: ProjectId,
    /// 父分类 ID（None 为根）
    parent_id: Option<WbsCategoryId>,
    /// 分类名称
    name: String,
    /// 同级排序（相同时按名称）
    sort_order: i32,
    /// 审计信息
    audit_info: AuditInfo,
}

impl WbsCategory {
    /// 创建根分类
    pub fn new_root(project_id: ProjectId, name: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: WbsCategoryId::new(),
            project_id,
            parent_id: None,
            name: name.into(),
            sort_order,
            audit_info: AuditInfo::default(),
        }
    }

    /// 创建子分类
    pub fn new_child(
        project_id: ProjectId,
        name: impl Into<String>,
        sort_order: i32,
        parent: &WbsCategory,
    ) -> ServiceResult<Self> {
        if parent.project_id != project_id {
            return Err(ServiceError::InvalidParent(
                "父分类属于不同项目".to_string(),
            ));
        }

        Ok(Self {
            id: WbsCategoryId::new(),
            project_id,
            parent_id: Some(parent.id),
            name: name.into(),
            sort_order,
            audit_info: AuditInfo::default(),
        })
    }

    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: WbsCategoryId,
        project_id: ProjectId,
        parent_id: Option<WbsCategoryId>,
        name: String,
        sort_order: i32,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            project_id,
            parent_id,
            name,
            sort_order,
            audit_info,
        }
    }

    pub fn id(&self) -> &WbsCategoryId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn parent_id(&self) -> Option<&WbsCategoryId> {
        self.parent_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    // ========== 更新 ==========

    /// 更新名称
    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.audit_info.update(None);
    }

    /// 更新同级排序
    pub fn update_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
        self.audit_info.update(None);
    }
}

impl Entity for WbsCategory {
    type Id = WbsCategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for WbsCategory {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
