pub mod amortization;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod errors;
pub mod serialization;
pub mod types;

// re-export key types
pub use amortization::{build_schedule, AmortizationCalculator, MAX_TERM_MONTHS, SETTLEMENT_TOLERANCE};
pub use config::{EligibilityPolicy, ProductRule};
pub use decimal::{Money, Rate};
pub use eligibility::{evaluate, LoanEvaluator};
pub use errors::{EligibilityError, Result};
pub use serialization::DecisionView;
pub use types::{
    Installment, LoanDecision, LoanRequest, LoanRequestBuilder, ProductLimits, ProductType,
    ScheduleSummary,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
