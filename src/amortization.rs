use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::errors::{EligibilityError, Result};
use crate::types::Installment;

/// residual balance below this is treated as settled on the final period
pub const SETTLEMENT_TOLERANCE: Decimal = dec!(0.000001);

/// longest schedule the calculator will build (100 years)
pub const MAX_TERM_MONTHS: u32 = 1200;

/// fixed-payment (annuity) amortization calculator
#[derive(Debug, Clone, Copy)]
pub struct AmortizationCalculator {
    settlement_tolerance: Decimal,
}

impl Default for AmortizationCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl AmortizationCalculator {
    pub fn new() -> Self {
        Self {
            settlement_tolerance: SETTLEMENT_TOLERANCE,
        }
    }

    /// constant monthly payment for the given principal, term and annual rate
    ///
    /// payment = P * r / (1 - (1 + r)^-n), with r the monthly rate
    pub fn monthly_payment(&self, principal: Money, term_months: u32, annual_rate: Rate) -> Result<Money> {
        check_inputs(principal, term_months, annual_rate)?;

        let r = annual_rate.monthly_rate().as_decimal();
        let discount = discount_factor(r, term_months);
        let denominator = Decimal::ONE - discount;

        principal
            .as_decimal()
            .checked_mul(r)
            .and_then(|numerator| numerator.checked_div(denominator))
            .map(Money::from_decimal)
            .ok_or_else(|| EligibilityError::InvalidSchedule {
                message: format!("payment is not representable for rate {annual_rate} over {term_months} months"),
            })
    }

    /// build the month-by-month schedule, exactly `term_months` rows long
    pub fn build_schedule(
        &self,
        principal: Money,
        term_months: u32,
        annual_rate: Rate,
    ) -> Result<Vec<Installment>> {
        let payment = self.monthly_payment(principal, term_months, annual_rate)?;
        let monthly_rate = annual_rate.monthly_rate();

        let mut schedule = Vec::with_capacity(term_months as usize);
        let mut balance = principal;

        for period in 1..=term_months {
            let (interest, principal_portion, next_balance) = balance
                .apply_rate(monthly_rate)
                .and_then(|interest| {
                    let principal_portion = payment.checked_sub(interest)?;
                    Some((interest, principal_portion, balance.checked_sub(principal_portion)?))
                })
                .ok_or_else(|| EligibilityError::InvalidSchedule {
                    message: format!("balance is not representable at period {period}"),
                })?;
            balance = next_balance;

            let mut remaining_balance = balance.max(Money::ZERO);
            if period == term_months && remaining_balance.as_decimal() < self.settlement_tolerance {
                remaining_balance = Money::ZERO;
            }

            schedule.push(Installment {
                period,
                payment,
                interest,
                principal: principal_portion,
                remaining_balance,
            });
        }

        Ok(schedule)
    }
}

/// build a schedule with the default calculator
pub fn build_schedule(principal: Money, term_months: u32, annual_rate: Rate) -> Result<Vec<Installment>> {
    AmortizationCalculator::new().build_schedule(principal, term_months, annual_rate)
}

fn check_inputs(principal: Money, term_months: u32, annual_rate: Rate) -> Result<()> {
    if !principal.is_positive() {
        return Err(EligibilityError::InvalidSchedule {
            message: format!("principal must be positive, got {principal}"),
        });
    }
    if term_months == 0 {
        return Err(EligibilityError::InvalidSchedule {
            message: "term must be at least one month".to_string(),
        });
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(EligibilityError::InvalidSchedule {
            message: format!("term of {term_months} months exceeds the maximum of {MAX_TERM_MONTHS}"),
        });
    }
    if !annual_rate.monthly_rate().is_positive() {
        return Err(EligibilityError::InvalidSchedule {
            message: format!("rate must be positive, got {annual_rate}"),
        });
    }
    Ok(())
}

/// (1 + r)^-n by repeated division, stopping once it underflows to zero
fn discount_factor(r: Decimal, n: u32) -> Decimal {
    let base = Decimal::ONE / (Decimal::ONE + r);
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor *= base;
        if factor.is_zero() {
            break;
        }
    }
    factor
}
