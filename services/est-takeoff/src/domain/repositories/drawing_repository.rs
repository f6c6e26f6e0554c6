//! 图纸标识只读接口
//!
//! 图纸上传、存储与渲染都在引擎之外，这里只取
//! (图纸, 项目, 页数) 的标识三元组

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DrawingId, ProjectId};
use crate::error::ServiceResult;

/// 图纸标识
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingRef {
    pub id: DrawingId,
    pub project_id: ProjectId,
    pub name: String,
    pub page_count: i32,
}

/// 图纸标识只读接口
#[async_trait]
pub trait DrawingRepository: Send + Sync {
    /// 根据 ID 查找图纸标识
    async fn find_by_id(&self, id: &DrawingId) -> ServiceResult<Option<DrawingRef>>;
}
