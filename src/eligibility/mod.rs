pub mod limits;
pub mod validation;

use tracing::{debug, warn};

use crate::amortization::AmortizationCalculator;
use crate::config::EligibilityPolicy;
use crate::decimal::Money;
use crate::errors::{EligibilityError, Result};
use crate::types::{Installment, LoanDecision, LoanRequest, ProductLimits, ProductType};

pub use limits::{check_amount, resolve_limits};
pub use validation::{validate, ValidatedRequest};

/// evaluates loan requests against an eligibility policy
#[derive(Debug, Clone, Default)]
pub struct LoanEvaluator {
    policy: EligibilityPolicy,
    calculator: AmortizationCalculator,
}

impl LoanEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self {
            policy,
            calculator: AmortizationCalculator::new(),
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// borrowing range for a product at the given income
    pub fn limits_for(&self, product: &ProductType, annual_income: Money) -> Result<ProductLimits> {
        resolve_limits(&self.policy, product, annual_income)
    }

    /// decide a request; every input yields a decision
    pub fn evaluate(&self, request: &LoanRequest) -> LoanDecision {
        match self.approve(request) {
            Ok((amount, schedule)) => {
                debug!(
                    product = %request.product_type,
                    amount = %amount,
                    term_months = request.term_months,
                    "loan approved"
                );
                LoanDecision::approved(amount, schedule)
            }
            Err(reason) => {
                if let EligibilityError::InvalidProductType { tag } = &reason {
                    warn!(product = %tag, "unrecognized product type");
                }
                debug!(product = %request.product_type, reason = %reason, "loan rejected");
                LoanDecision::rejected(reason)
            }
        }
    }

    fn approve(&self, request: &LoanRequest) -> Result<(Money, Vec<Installment>)> {
        let validated = validate(request)?;
        let limits = self.limits_for(&validated.product, validated.annual_income)?;
        check_amount(&limits, validated.requested_amount)?;

        let schedule = self.calculator.build_schedule(
            validated.requested_amount,
            validated.term_months,
            validated.annual_rate,
        )?;
        Ok((validated.requested_amount, schedule))
    }
}

/// evaluate with the default policy
pub fn evaluate(request: &LoanRequest) -> LoanDecision {
    LoanEvaluator::default().evaluate(request)
}
