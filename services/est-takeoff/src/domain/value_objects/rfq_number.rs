//! 询价单编号值对象

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 询价单编号最大长度
const MAX_LENGTH: usize = 40;

/// 询价单编号错误
#[derive(Debug, Error)]
pub enum RfqNumberError {
    #[error("询价单编号不能为空")]
    Empty,
    #[error("询价单编号长度不能超过 {MAX_LENGTH} 个字符")]
    TooLong,
    #[error("询价单编号包含无效字符: {0}")]
    InvalidCharacter(char),
}

/// 询价单编号值对象
///
/// 业务规则:
/// - 不能为空
/// - 最大长度 40 字符
/// - 只允许字母、数字、连字符、下划线和斜杠
/// - 项目内唯一（唯一性由仓储层保证）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfqNumber(String);

impl RfqNumber {
    /// 创建新的询价单编号
    pub fn new(number: impl Into<String>) -> Result<Self, RfqNumberError> {
        let number = number.into().trim().to_uppercase();

        if number.is_empty() {
            return Err(RfqNumberError::Empty);
        }

        if number.len() > MAX_LENGTH {
            return Err(RfqNumberError::TooLong);
        }

        for c in number.chars() {
            if !c.is_alphanumeric() && c != '-' && c != '_' && c != '/' {
                return Err(RfqNumberError::InvalidCharacter(c));
            }
        }

        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RfqNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RfqNumber {
    type Error = RfqNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RfqNumber {
    type Error = RfqNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rfq_number() {
        let number = RfqNumber::new("RFQ-2025-001").unwrap();
        assert_eq!(number.as_str(), "RFQ-2025-001");
    }

    #[test]
    fn test_uppercase_conversion() {
        let number = RfqNumber::new("rfq-001").unwrap();
        assert_eq!(number.as_str(), "RFQ-001");
    }

    #[test]
    fn test_trims_whitespace() {
        let number = RfqNumber::new("  RFQ-7  ").unwrap();
        assert_eq!(number.as_str(), "RFQ-7");
    }

    #[test]
    fn test_empty_number() {
        let result = RfqNumber::new("   ");
        assert!(matches!(result, Err(RfqNumberError::Empty)));
    }

    #[test]
    fn test_too_long_number() {
        let result = RfqNumber::new("A".repeat(41));
        assert!(matches!(result, Err(RfqNumberError::TooLong)));
    }

    #[test]
    fn test_invalid_character() {
        let result = RfqNumber::new("RFQ 001");
        assert!(matches!(
            result,
            Err(RfqNumberError::InvalidCharacter(' '))
        ));
    }
}
