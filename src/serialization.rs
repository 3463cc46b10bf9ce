//! serialization support for decisions
use serde::Serialize;

use crate::decimal::Money;
use crate::types::{Installment, LoanDecision};

/// decision with every amount rounded for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionView {
    pub approved: bool,
    pub approved_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub schedule: Vec<Installment>,
}

impl DecisionView {
    pub fn from_decision(decision: &LoanDecision, dp: u32) -> Self {
        DecisionView {
            approved: decision.is_approved(),
            approved_amount: decision.approved_amount().round_dp(dp),
            error_message: decision.error_message().map(str::to_string),
            schedule: decision
                .schedule()
                .iter()
                .map(|row| Installment {
                    period: row.period,
                    payment: row.payment.round_dp(dp),
                    interest: row.interest.round_dp(dp),
                    principal: row.principal.round_dp(dp),
                    remaining_balance: row.remaining_balance.round_dp(dp),
                })
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl LoanDecision {
    /// view rounded to `dp` decimal places
    pub fn rounded(&self, dp: u32) -> DecisionView {
        DecisionView::from_decision(self, dp)
    }

    /// convert to pretty-printed json string at full precision
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
