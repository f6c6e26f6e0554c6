//! 材料目录读模型

use common::TenantId;
use domain_core::{Entity, Money};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MaterialId;

/// 公司材料目录行
///
/// 材料主数据由协作方维护，引擎侧只读：
/// 校验工程量条目引用并为汇总提供单价与人工系数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// 材料 ID
    id: MaterialId,
    /// 所属公司（租户）ID
    tenant_id: TenantId,
    /// 零件号（公司内唯一）
    part_number: String,
    /// 材料类别
    category: String,
    /// 描述
    description: String,
    /// 规格
    size: Option<String>,
    /// 计量单位（如 LF、EA）
    unit: String,
    /// 单位目录价
    unit_list_price: Money,
    /// 每计量单位的人工系数
    labor_units: f64,
    /// 是否有效（软删除标记）
    is_active: bool,
}

impl Material {
    /// 从各部分构建（目录行快照）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: MaterialId,
        tenant_id: TenantId,
        part_number: String,
        category: String,
        description: String,
        size: Option<String>,
        unit: String,
        unit_list_price: Money,
        labor_units: f64,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            tenant_id,
            part_number,
            category,
            description,
            size,
            unit,
            unit_list_price,
            labor_units,
            is_active,
        }
    }

    pub fn id(&self) -> &MaterialId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_list_price(&self) -> &Money {
        &self.unit_list_price
    }

    pub fn labor_units(&self) -> f64 {
        self.labor_units
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
