//! WBS commands

use common::{TenantId, UserId};

use crate::domain::value_objects::{ProjectId, TakeoffItemId, WbsCategoryId};
use crate::error::{ServiceError, ServiceResult};

/// 分类名称最大长度
const MAX_NAME_LENGTH: usize = 100;

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("分类名称不能为空".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ServiceError::Validation(format!(
            "分类名称长度不能超过{}个字符",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// 创建 WBS 分类命令
#[derive(Debug, Clone)]
pub struct CreateWbsCategoryCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub name: String,
    /// None 为根分类
    pub parent_id: Option<WbsCategoryId>,
    /// 缺省时取同级最大排序 + 1
    pub sort_order: Option<i32>,
}

impl CreateWbsCategoryCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        validate_name(&self.name)
    }
}

/// 更新 WBS 分类命令（只写提供的字段，先整体校验）
#[derive(Debug, Clone)]
pub struct UpdateWbsCategoryCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub category_id: WbsCategoryId,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateWbsCategoryCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// 删除 WBS 分类命令
///
/// 只允许删除无条目引用、无子分类的空叶
#[derive(Debug, Clone)]
pub struct DeleteWbsCategoryCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub category_id: WbsCategoryId,
}

/// 预置默认 WBS 分类命令
///
/// 项目已有分类时跳过（幂等）
#[derive(Debug, Clone)]
pub struct SeedWbsCategoriesCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub project_id: ProjectId,
}

/// 批量改写条目 WBS 分类命令
///
/// 整批原子生效；target 为 None 表示归入未分类桶
#[derive(Debug, Clone)]
pub struct BulkReassignWbsCommand {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub item_ids: Vec<TakeoffItemId>,
    pub wbs_category_id: Option<WbsCategoryId>,
}

impl BulkReassignWbsCommand {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.item_ids.is_empty() {
            return Err(ServiceError::Validation(
                "批量调整至少需要一个条目".to_string(),
            ));
        }
        Ok(())
    }
}
