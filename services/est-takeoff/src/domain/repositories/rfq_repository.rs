//! 询价单仓储接口

use async_trait::async_trait;

use crate::domain::entities::{Rfq, RfqLine};
use crate::domain::value_objects::{ProjectId, RfqId, RfqNumber};
use crate::error::ServiceResult;

/// 询价单仓储接口
#[async_trait]
pub trait RfqRepository: Send + Sync {
    /// 保存询价单（新建）
    async fn save(&self, rfq: &Rfq) -> ServiceResult<()>;

    /// 更新询价单（状态/供应商信息）
    async fn update(&self, rfq: &Rfq) -> ServiceResult<()>;

    /// 根据 ID 查找询价单
    async fn find_by_id(&self, id: &RfqId) -> ServiceResult<Option<Rfq>>;

    /// 项目内编号是否已占用
    async fn exists_by_number(
        &self,
        project_id: &ProjectId,
        rfq_number: &RfqNumber,
    ) -> ServiceResult<bool>;

    /// 项目的全部询价单（新的在前）
    async fn list_by_project(&self, project_id: &ProjectId) -> ServiceResult<Vec<Rfq>>;

    /// 追加询价单行
    async fn save_line(&self, line: &RfqLine) -> ServiceResult<()>;

    /// 询价单的全部行
    async fn list_lines(&self, rfq_id: &RfqId) -> ServiceResult<Vec<RfqLine>>;
}
