//! 货币值对象

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 货币代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(pub String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.to_uppercase())
    }

    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn cad() -> Self {
        Self("CAD".to_string())
    }

    pub fn eur() -> Self {
        Self("EUR".to_string())
    }
}

/// 金额值对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// 金额（以最小单位存储，如美分）
    pub amount: i64,
    /// 货币代码
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    pub fn usd(amount: i64) -> Self {
        Self::new(amount, Currency::usd())
    }

    /// 转换为浮点数（用于显示）
    pub fn to_decimal(&self) -> f64 {
        self.amount as f64 / 100.0
    }

    /// 从浮点数创建
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// 按浮点系数缩放，四舍五入到最小单位
    pub fn mul_f64(&self, factor: f64) -> Self {
        Self::new(
            (self.amount as f64 * factor).round() as i64,
            self.currency.clone(),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency.clone())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        assert_eq!(
            self.currency, other.currency,
            "Cannot add money with different currencies"
        );
        Self::new(self.amount + other.amount, self.currency)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        assert_eq!(
            self.currency, other.currency,
            "Cannot subtract money with different currencies"
        );
        Self::new(self.amount - other.amount, self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, multiplier: i64) -> Self {
        Self::new(self.amount * multiplier, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        let price = Money::from_decimal(3.25, Currency::usd());
        assert_eq!(price.amount, 325);
        assert_eq!(price.to_decimal(), 3.25);
    }

    #[test]
    fn test_mul_f64() {
        // 15 LF x $3.25 = $48.75
        let price = Money::usd(325);
        assert_eq!(price.mul_f64(15.0), Money::usd(4875));
    }
}
