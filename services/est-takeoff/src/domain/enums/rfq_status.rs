//! 询价单状态枚举

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ServiceError;

/// 询价单状态
///
/// 正常流转 Draft -> Sent -> Closed，允许管理员显式重置回 Draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    /// 草稿
    #[default]
    Draft,
    /// 已发送
    Sent,
    /// 已关闭
    Closed,
}

impl RfqStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Closed => "closed",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// 是否允许流转到目标状态
    ///
    /// 同状态重复设置视为幂等；重置到 Draft 总是允许
    pub fn can_transition_to(&self, next: RfqStatus) -> bool {
        match (self, next) {
            (_, RfqStatus::Draft) => true,
            (RfqStatus::Draft, RfqStatus::Sent) => true,
            (RfqStatus::Sent, RfqStatus::Sent) => true,
            (RfqStatus::Sent, RfqStatus::Closed) => true,
            (RfqStatus::Closed, RfqStatus::Closed) => true,
            _ => false,
        }
    }
}

impl FromStr for RfqStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "closed" => Ok(Self::Closed),
            other => Err(ServiceError::Validation(format!(
                "询价单状态无效: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RfqStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(RfqStatus::Draft.can_transition_to(RfqStatus::Sent));
        assert!(RfqStatus::Sent.can_transition_to(RfqStatus::Closed));
    }

    #[test]
    fn test_forbidden_transitions() {
        assert!(!RfqStatus::Draft.can_transition_to(RfqStatus::Closed));
        assert!(!RfqStatus::Closed.can_transition_to(RfqStatus::Sent));
    }

    #[test]
    fn test_reset_and_idempotent() {
        assert!(RfqStatus::Closed.can_transition_to(RfqStatus::Draft));
        assert!(RfqStatus::Sent.can_transition_to(RfqStatus::Sent));
    }
}
