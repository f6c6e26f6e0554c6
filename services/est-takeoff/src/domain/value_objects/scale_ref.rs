//! 比例尺引用值对象

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::value_objects::CustomScaleId;
use crate::error::{ServiceError, ServiceResult};

/// 比例尺引用
///
/// 页面默认比例尺与比例尺区域都指向一个来源：
/// 标准比例尺表中的固定条目，或项目自定义比例尺
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScaleRef {
    /// 标准比例尺（固定表，字符串 ID 如 "arch_1_4"）
    Standard(String),
    /// 项目自定义比例尺
    Custom(CustomScaleId),
}

impl ScaleRef {
    pub fn standard(id: impl Into<String>) -> Self {
        Self::Standard(id.into())
    }

    pub fn custom(id: CustomScaleId) -> Self {
        Self::Custom(id)
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::Custom(_) => "custom",
        }
    }

    pub fn id_string(&self) -> String {
        match self {
            Self::Standard(id) => id.clone(),
            Self::Custom(id) => id.to_string(),
        }
    }

    /// 从存储列还原（kind + id 两列）
    pub fn from_parts(kind: &str, id: &str) -> ServiceResult<Self> {
        match kind {
            "standard" => Ok(Self::Standard(id.to_string())),
            "custom" => {
                let scale_id = CustomScaleId::from_str(id).map_err(|e| {
                    ServiceError::Validation(format!("自定义比例尺 ID 无效: {}", e))
                })?;
                Ok(Self::Custom(scale_id))
            }
            other => Err(ServiceError::Validation(format!(
                "比例尺引用类型无效: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_standard() {
        let scale_ref = ScaleRef::standard("arch_1_4");
        let restored = ScaleRef::from_parts(scale_ref.kind_str(), &scale_ref.id_string()).unwrap();
        assert_eq!(restored, scale_ref);
    }

    #[test]
    fn test_round_trip_custom() {
        let scale_ref = ScaleRef::custom(CustomScaleId::new());
        let restored = ScaleRef::from_parts(scale_ref.kind_str(), &scale_ref.id_string()).unwrap();
        assert_eq!(restored, scale_ref);
    }

    #[test]
    fn test_invalid_kind() {
        assert!(ScaleRef::from_parts("ocr", "x").is_err());
    }
}
