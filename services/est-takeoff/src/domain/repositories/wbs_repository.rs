//! WBS 分类仓储接口

use async_trait::async_trait;

use crate::domain::entities::WbsCategory;
use crate::domain::value_objects::{ProjectId, WbsCategoryId};
use crate::error::ServiceResult;

/// WBS 分类仓储接口
#[async_trait]
pub trait WbsRepository: Send + Sync {
    /// 保存分类（新建）
    async fn save(&self, category: &WbsCategory) -> ServiceResult<()>;

    /// 更新分类
    async fn update(&self, category: &WbsCategory) -> ServiceResult<()>;

    /// 根据 ID 查找分类
    async fn find_by_id(&self, id: &WbsCategoryId) -> ServiceResult<Option<WbsCategory>>;

    /// 项目的全部分类（平面列表）
    async fn list_by_project(&self, project_id: &ProjectId)
    -> ServiceResult<Vec<WbsCategory>>;

    /// 项目分类计数（预置判幂等用）
    async fn count_by_project(&self, project_id: &ProjectId) -> ServiceResult<u64>;

    /// 是否存在以该分类为父的节点
    async fn has_children(&self, id: &WbsCategoryId) -> ServiceResult<bool>;

    /// 删除分类（删空叶前的结构校验由调用方完成）
    async fn delete(&self, id: &WbsCategoryId) -> ServiceResult<()>;
}
