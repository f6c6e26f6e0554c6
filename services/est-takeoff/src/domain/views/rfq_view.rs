//! 询价单展示视图

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Material, Rfq, RfqLine};

/// 询价单行连同材料目录列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqLineView {
    pub line: RfqLine,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
}

impl RfqLineView {
    pub fn assemble(line: RfqLine, material: Option<&Material>) -> Self {
        Self {
            part_number: material.map(|m| m.part_number().to_string()),
            description: material.map(|m| m.description().to_string()),
            size: material.and_then(|m| m.size().map(|s| s.to_string())),
            line,
        }
    }
}

/// 询价单连同其行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqWithLines {
    pub rfq: Rfq,
    pub lines: Vec<RfqLineView>,
}
