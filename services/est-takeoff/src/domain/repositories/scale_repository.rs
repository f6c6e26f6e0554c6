//! 比例尺仓储接口

use async_trait::async_trait;

use crate::domain::entities::{CustomScale, PageScale, ScaleZone};
use crate::domain::value_objects::{CustomScaleId, DrawingId, ProjectId, ScaleZoneId};
use crate::error::ServiceResult;

/// 比例尺仓储接口
///
/// 覆盖自定义比例尺、页面默认比例尺与比例尺区域
#[async_trait]
pub trait ScaleRepository: Send + Sync {
    // ========== 自定义比例尺 ==========

    /// 保存自定义比例尺
    async fn save_custom_scale(&self, scale: &CustomScale) -> ServiceResult<()>;

    /// 根据 ID 查找自定义比例尺
    async fn find_custom_scale(&self, id: &CustomScaleId)
    -> ServiceResult<Option<CustomScale>>;

    /// 项目的全部自定义比例尺
    async fn list_custom_scales(&self, project_id: &ProjectId)
    -> ServiceResult<Vec<CustomScale>>;

    /// 删除自定义比例尺
    async fn delete_custom_scale(&self, id: &CustomScaleId) -> ServiceResult<()>;

    // ========== 页面默认比例尺 ==========

    /// 写入页面默认比例尺（(图纸, 页码) 唯一，重复设置覆盖）
    async fn upsert_page_scale(&self, page_scale: &PageScale) -> ServiceResult<()>;

    /// 查找页面默认比例尺
    async fn find_page_scale(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Option<PageScale>>;

    // ========== 比例尺区域 ==========

    /// 保存比例尺区域
    async fn save_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()>;

    /// 更新比例尺区域
    async fn update_scale_zone(&self, zone: &ScaleZone) -> ServiceResult<()>;

    /// 根据 ID 查找比例尺区域
    async fn find_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<Option<ScaleZone>>;

    /// 页面上的全部比例尺区域
    async fn list_scale_zones(
        &self,
        drawing_id: &DrawingId,
        page_number: i32,
    ) -> ServiceResult<Vec<ScaleZone>>;

    /// 删除比例尺区域
    async fn delete_scale_zone(&self, id: &ScaleZoneId) -> ServiceResult<()>;
}
