use crate::config::EligibilityPolicy;
use crate::decimal::Money;
use crate::errors::{EligibilityError, Result};
use crate::types::{ProductLimits, ProductType};

/// borrowing range for a product, or `InvalidProductType` when it has no rule
pub fn resolve_limits(
    policy: &EligibilityPolicy,
    product: &ProductType,
    annual_income: Money,
) -> Result<ProductLimits> {
    policy
        .rule_for(product)
        .map(|rule| rule.limits(annual_income))
        .ok_or_else(|| EligibilityError::InvalidProductType {
            tag: product.tag().to_string(),
        })
}

/// minimum is checked before maximum
pub fn check_amount(limits: &ProductLimits, amount: Money) -> Result<()> {
    if amount < limits.minimum {
        return Err(EligibilityError::BelowMinimum {
            minimum: limits.minimum,
        });
    }
    if amount > limits.maximum {
        return Err(EligibilityError::ExceedsMaximum {
            maximum: limits.maximum,
        });
    }
    Ok(())
}
