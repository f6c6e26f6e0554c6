//! 工程量台账仓储接口

use async_trait::async_trait;

use crate::domain::entities::{TakeoffItem, TakeoffItemFilter};
use crate::domain::value_objects::{DrawingId, ProjectId, TakeoffItemId, WbsCategoryId};
use crate::error::ServiceResult;

/// 工程量台账仓储接口
#[async_trait]
pub trait TakeoffRepository: Send + Sync {
    /// 保存条目（新建）
    async fn save(&self, item: &TakeoffItem) -> ServiceResult<()>;

    /// 更新条目
    async fn update(&self, item: &TakeoffItem) -> ServiceResult<()>;

    /// 根据 ID 查找条目
    async fn find_by_id(&self, id: &TakeoffItemId) -> ServiceResult<Option<TakeoffItem>>;

    /// 批量查找条目（批量改分类的前置校验用）
    async fn find_many(&self, ids: &[TakeoffItemId]) -> ServiceResult<Vec<TakeoffItem>>;

    /// 图纸内条目，支持按页码和 WBS 分类筛选
    async fn list_by_drawing(
        &self,
        drawing_id: &DrawingId,
        filter: &TakeoffItemFilter,
    ) -> ServiceResult<Vec<TakeoffItem>>;

    /// 项目内全部条目（跨图纸）
    async fn list_by_project(&self, project_id: &ProjectId)
    -> ServiceResult<Vec<TakeoffItem>>;

    /// 引用该 WBS 分类的条目数（删除守卫用）
    async fn count_by_category(&self, category_id: &WbsCategoryId) -> ServiceResult<u64>;

    /// 批量改写条目的 WBS 分类
    ///
    /// 存储层保证原子性：要么整批生效，要么一条不写
    async fn bulk_reassign_category(
        &self,
        item_ids: &[TakeoffItemId],
        category_id: Option<&WbsCategoryId>,
    ) -> ServiceResult<u64>;

    /// 删除条目
    async fn delete(&self, id: &TakeoffItemId) -> ServiceResult<()>;
}
