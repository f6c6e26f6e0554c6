//! 工程量台账显示行

use domain_core::Money;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Material, TakeoffItem};

/// 台账显示行
///
/// 条目连同材料目录列与解析出的 WBS 名称，延伸价/人工已算好
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffLine {
    pub item: TakeoffItem,
    pub part_number: String,
    pub material_category: String,
    pub description: String,
    pub size: Option<String>,
    pub unit: String,
    pub unit_list_price: Money,
    pub labor_units: f64,
    pub wbs_name: Option<String>,
    pub extended_price: Money,
    pub extended_labor: f64,
}

impl TakeoffLine {
    pub fn assemble(item: TakeoffItem, material: &Material, wbs_name: Option<String>) -> Self {
        let extended_price = item.extended_price(material.unit_list_price());
        let extended_labor = item.extended_labor(material.labor_units());
        Self {
            part_number: material.part_number().to_string(),
            material_category: material.category().to_string(),
            description: material.description().to_string(),
            size: material.size().map(|s| s.to_string()),
            unit: material.unit().to_string(),
            unit_list_price: material.unit_list_price().clone(),
            labor_units: material.labor_units(),
            wbs_name,
            extended_price,
            extended_labor,
            item,
        }
    }
}
