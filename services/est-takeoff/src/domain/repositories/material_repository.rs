//! 材料目录只读接口
//!
//! 材料主数据由协作方维护，引擎只在此边界消费

use async_trait::async_trait;
use common::TenantId;

use crate::domain::entities::Material;
use crate::domain::value_objects::MaterialId;
use crate::error::ServiceResult;

/// 材料目录只读接口
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// 根据 ID 查找材料（含已停用材料——存量汇总仍需解析）
    async fn find_by_id(&self, id: &MaterialId) -> ServiceResult<Option<Material>>;

    /// 批量查找材料（汇总装配用）
    async fn find_many(&self, ids: &[MaterialId]) -> ServiceResult<Vec<Material>>;

    /// 公司目录列表，支持按类别筛选与仅看有效
    async fn list_by_tenant(
        &self,
        tenant_id: &TenantId,
        category: Option<&str>,
        active_only: bool,
    ) -> ServiceResult<Vec<Material>>;
}
