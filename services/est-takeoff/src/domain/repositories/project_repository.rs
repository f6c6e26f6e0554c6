//! 项目标识只读接口
//!
//! 项目/公司主数据由协作方维护；引擎据此做租户隔离校验

use async_trait::async_trait;
use common::TenantId;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ProjectId;
use crate::error::ServiceResult;

/// 项目标识
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub tenant_id: TenantId,
    pub name: String,
}

/// 项目标识只读接口
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// 根据 ID 查找项目标识
    async fn find_by_id(&self, id: &ProjectId) -> ServiceResult<Option<ProjectRef>>;
}
