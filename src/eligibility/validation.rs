use rust_decimal::Decimal;

use crate::amortization::MAX_TERM_MONTHS;
use crate::decimal::{Money, Rate};
use crate::errors::{EligibilityError, Result};
use crate::types::{LoanRequest, ProductType};

/// a request whose fields passed the shape checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub product: ProductType,
    pub annual_income: Money,
    pub requested_amount: Money,
    pub term_months: u32,
    pub annual_rate: Rate,
}

type Check = fn(&LoanRequest) -> Option<EligibilityError>;

/// shape checks in the order they are reported; the first failure wins
const CHECKS: [Check; 5] = [
    product_present,
    income_positive,
    amount_positive,
    term_positive,
    rate_positive,
];

fn product_present(r: &LoanRequest) -> Option<EligibilityError> {
    r.product_type.is_empty().then_some(EligibilityError::ProductTypeRequired)
}

fn income_positive(r: &LoanRequest) -> Option<EligibilityError> {
    (!r.annual_income.is_positive()).then_some(EligibilityError::IncomeNotPositive)
}

fn amount_positive(r: &LoanRequest) -> Option<EligibilityError> {
    (!r.requested_amount.is_positive()).then_some(EligibilityError::AmountNotPositive)
}

fn term_positive(r: &LoanRequest) -> Option<EligibilityError> {
    (r.term_months <= 0).then_some(EligibilityError::TermNotPositive)
}

fn rate_positive(r: &LoanRequest) -> Option<EligibilityError> {
    (r.annual_interest_rate <= Decimal::ZERO).then_some(EligibilityError::RateNotPositive)
}

/// run the shape checks and hand back the typed request
pub fn validate(request: &LoanRequest) -> Result<ValidatedRequest> {
    if let Some(err) = CHECKS.iter().find_map(|check| check(request)) {
        return Err(err);
    }

    let term_months = u32::try_from(request.term_months)
        .ok()
        .filter(|months| *months <= MAX_TERM_MONTHS)
        .ok_or_else(|| EligibilityError::InvalidRequest {
            message: format!(
                "term of {} months exceeds the maximum of {MAX_TERM_MONTHS}",
                request.term_months
            ),
        })?;

    // a positive rate can still vanish once expressed as a monthly fraction
    let annual_rate = request.annual_rate();
    if !annual_rate.monthly_rate().is_positive() {
        return Err(EligibilityError::InvalidRequest {
            message: format!(
                "interest rate of {}% is too small to schedule",
                request.annual_interest_rate
            ),
        });
    }

    Ok(ValidatedRequest {
        product: ProductType::from(request.product_type.as_str()),
        annual_income: request.annual_income,
        requested_amount: request.requested_amount,
        term_months,
        annual_rate,
    })
}
