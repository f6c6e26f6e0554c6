//! 比例尺类别枚举

use serde::{Deserialize, Serialize};

/// 标准比例尺类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFamily {
    /// 建筑比例尺（如 1/4" = 1'-0"）
    Architectural,
    /// 工程比例尺（如 1" = 20'）
    Engineering,
    /// 公制比例尺（如 1:50）
    Metric,
}

impl ScaleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architectural => "architectural",
            Self::Engineering => "engineering",
            Self::Metric => "metric",
        }
    }
}

impl std::fmt::Display for ScaleFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
