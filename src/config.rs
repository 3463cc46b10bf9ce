use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EligibilityError, Result};
use crate::types::{ProductLimits, ProductType};

/// borrowing rule for one product
///
/// maximum = annual income * income_multiplier / income_divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRule {
    pub minimum: Money,
    pub income_multiplier: Decimal,
    #[serde(default = "default_divisor")]
    pub income_divisor: Decimal,
}

fn default_divisor() -> Decimal {
    Decimal::ONE
}

impl ProductRule {
    /// 50M floor, six times annual income
    pub fn mortgage() -> Self {
        Self {
            minimum: Money::from_major(50_000_000),
            income_multiplier: dec!(6),
            income_divisor: Decimal::ONE,
        }
    }

    /// 5M floor, three times annual income
    pub fn auto() -> Self {
        Self {
            minimum: Money::from_major(5_000_000),
            income_multiplier: dec!(3),
            income_divisor: Decimal::ONE,
        }
    }

    /// 1M floor, one and a half times annual income
    pub fn unsecured_personal() -> Self {
        Self {
            minimum: Money::from_major(1_000_000),
            income_multiplier: dec!(1.5),
            income_divisor: Decimal::ONE,
        }
    }

    /// 500k floor, six months of income
    pub fn personal() -> Self {
        Self {
            minimum: Money::from_major(500_000),
            income_multiplier: dec!(6),
            income_divisor: dec!(12),
        }
    }

    /// limits for the given annual income
    ///
    /// An income too large to scale leaves the product uncapped at `Money::MAX`.
    pub fn limits(&self, annual_income: Money) -> ProductLimits {
        // multiply before dividing so six months of a 10M income is exactly 5M
        let maximum = annual_income
            .checked_mul(self.income_multiplier)
            .and_then(|scaled| scaled.checked_div(self.income_divisor))
            .unwrap_or(Money::MAX);
        ProductLimits {
            minimum: self.minimum,
            maximum,
        }
    }

    fn validate(&self, product: &str) -> Result<()> {
        if self.minimum.is_negative() {
            return Err(EligibilityError::InvalidConfiguration {
                message: format!("{product}: minimum cannot be negative"),
            });
        }
        if self.income_multiplier <= Decimal::ZERO {
            return Err(EligibilityError::InvalidConfiguration {
                message: format!("{product}: income multiplier must be positive"),
            });
        }
        if self.income_divisor <= Decimal::ZERO {
            return Err(EligibilityError::InvalidConfiguration {
                message: format!("{product}: income divisor must be positive"),
            });
        }
        Ok(())
    }
}

/// eligibility rules for every supported product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub mortgage: ProductRule,
    pub auto: ProductRule,
    pub unsecured_personal: ProductRule,
    pub personal: ProductRule,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            mortgage: ProductRule::mortgage(),
            auto: ProductRule::auto(),
            unsecured_personal: ProductRule::unsecured_personal(),
            personal: ProductRule::personal(),
        }
    }
}

impl EligibilityPolicy {
    /// load a policy from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: EligibilityPolicy =
            serde_json::from_str(json).map_err(|e| EligibilityError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        self.mortgage.validate("mortgage")?;
        self.auto.validate("auto")?;
        self.unsecured_personal.validate("unsecured-personal")?;
        self.personal.validate("personal")?;
        Ok(())
    }

    /// rule for a product, None for unrecognized products
    pub fn rule_for(&self, product: &ProductType) -> Option<&ProductRule> {
        match product {
            ProductType::Mortgage => Some(&self.mortgage),
            ProductType::Auto => Some(&self.auto),
            ProductType::UnsecuredPersonal => Some(&self.unsecured_personal),
            ProductType::Personal => Some(&self.personal),
            ProductType::Unrecognized(_) => None,
        }
    }
}
