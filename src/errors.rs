use thiserror::Error;

use crate::decimal::Money;

/// Reasons a loan request is not approved, plus the failures of the library's own
/// entry points. The display strings are the messages handed back to applicants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("product type is required")]
    ProductTypeRequired,

    #[error("annual income must be greater than zero")]
    IncomeNotPositive,

    #[error("requested amount must be greater than zero")]
    AmountNotPositive,

    #[error("term must be greater than zero")]
    TermNotPositive,

    #[error("interest rate must be greater than zero")]
    RateNotPositive,

    #[error("invalid product type")]
    InvalidProductType {
        tag: String,
    },

    #[error("requested amount must be at least {minimum}")]
    BelowMinimum {
        minimum: Money,
    },

    #[error("requested amount exceeds the maximum allowed")]
    ExceedsMaximum {
        maximum: Money,
    },

    #[error("invalid schedule input: {message}")]
    InvalidSchedule {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
    },
}

impl EligibilityError {
    /// true for failures of the input shape checks, which run before any limit is resolved
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EligibilityError::ProductTypeRequired
                | EligibilityError::IncomeNotPositive
                | EligibilityError::AmountNotPositive
                | EligibilityError::TermNotPositive
                | EligibilityError::RateNotPositive
        )
    }
}

pub type Result<T> = std::result::Result<T, EligibilityError>;
