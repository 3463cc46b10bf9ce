use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Money, Rate};
use crate::errors::{EligibilityError, Result};

/// supported loan products
///
/// Tags are matched case-sensitively. Anything outside the closed set is kept as
/// `Unrecognized` so the evaluator can reject it with a dedicated message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    /// home loan
    Mortgage,
    /// vehicle loan
    Auto,
    /// unsecured "free investment" loan
    UnsecuredPersonal,
    /// payroll-linked personal loan
    Personal,
    Unrecognized(String),
}

impl ProductType {
    pub const SUPPORTED: [ProductType; 4] = [
        ProductType::Mortgage,
        ProductType::Auto,
        ProductType::UnsecuredPersonal,
        ProductType::Personal,
    ];

    /// string tag used on the wire
    pub fn tag(&self) -> &str {
        match self {
            ProductType::Mortgage => "mortgage",
            ProductType::Auto => "auto",
            ProductType::UnsecuredPersonal => "unsecured-personal",
            ProductType::Personal => "personal",
            ProductType::Unrecognized(tag) => tag,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ProductType::Unrecognized(_))
    }
}

impl From<&str> for ProductType {
    fn from(tag: &str) -> Self {
        match tag {
            "mortgage" => ProductType::Mortgage,
            "auto" => ProductType::Auto,
            "unsecured-personal" => ProductType::UnsecuredPersonal,
            "personal" => ProductType::Personal,
            other => ProductType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for ProductType {
    fn from(tag: String) -> Self {
        ProductType::from(tag.as_str())
    }
}

impl From<ProductType> for String {
    fn from(product: ProductType) -> Self {
        product.tag().to_string()
    }
}

impl FromStr for ProductType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ProductType::from(s))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// loan application as received from the caller, already parsed to numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// raw product tag; empty means missing
    #[serde(default)]
    pub product_type: String,
    pub annual_income: Money,
    pub requested_amount: Money,
    pub term_months: i64,
    /// nominal annual rate as a percentage (12 = 12%/year)
    pub annual_interest_rate: Decimal,
}

impl LoanRequest {
    pub fn builder() -> LoanRequestBuilder {
        LoanRequestBuilder::new()
    }

    /// parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EligibilityError::InvalidRequest {
            message: e.to_string(),
        })
    }

    /// product parsed from the raw tag, None when the tag is empty
    pub fn product(&self) -> Option<ProductType> {
        if self.product_type.is_empty() {
            None
        } else {
            Some(ProductType::from(self.product_type.as_str()))
        }
    }

    /// annual rate as a fraction
    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_interest_rate)
    }
}

/// builder for loan requests
#[derive(Debug, Clone, Default)]
pub struct LoanRequestBuilder {
    product_type: String,
    annual_income: Money,
    requested_amount: Money,
    term_months: i64,
    annual_interest_rate: Decimal,
}

impl LoanRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product_type = product.into();
        self
    }

    pub fn income(mut self, income: Money) -> Self {
        self.annual_income = income;
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.requested_amount = amount;
        self
    }

    pub fn term_months(mut self, months: i64) -> Self {
        self.term_months = months;
        self
    }

    /// annual rate as a percentage
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_interest_rate = percent;
        self
    }

    pub fn build(self) -> LoanRequest {
        LoanRequest {
            product_type: self.product_type,
            annual_income: self.annual_income,
            requested_amount: self.requested_amount,
            term_months: self.term_months,
            annual_interest_rate: self.annual_interest_rate,
        }
    }
}

/// borrowing range for one product and one income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLimits {
    pub minimum: Money,
    pub maximum: Money,
}

impl ProductLimits {
    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.minimum && amount <= self.maximum
    }
}

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-indexed month
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

/// totals over an approved schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub periods: u32,
}

/// outcome of evaluating a loan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanDecision {
    approved: bool,
    approved_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    schedule: Vec<Installment>,
    #[serde(skip)]
    rejection: Option<EligibilityError>,
}

impl LoanDecision {
    pub(crate) fn approved(amount: Money, schedule: Vec<Installment>) -> Self {
        Self {
            approved: true,
            approved_amount: amount,
            error_message: None,
            schedule,
            rejection: None,
        }
    }

    pub(crate) fn rejected(reason: EligibilityError) -> Self {
        Self {
            approved: false,
            approved_amount: Money::ZERO,
            error_message: Some(reason.to_string()),
            schedule: Vec::new(),
            rejection: Some(reason),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// requested amount when approved, zero otherwise
    pub fn approved_amount(&self) -> Money {
        self.approved_amount
    }

    /// applicant-facing message, None when approved
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn rejection(&self) -> Option<&EligibilityError> {
        self.rejection.as_ref()
    }

    pub fn schedule(&self) -> &[Installment] {
        &self.schedule
    }

    pub fn into_schedule(self) -> Vec<Installment> {
        self.schedule
    }

    /// totals for an approved decision, None when rejected or when a total
    /// does not fit in a decimal
    pub fn summary(&self) -> Option<ScheduleSummary> {
        let first = self.schedule.first()?;
        let total_interest = self
            .schedule
            .iter()
            .try_fold(Money::ZERO, |acc, i| acc.checked_add(i.interest))?;
        let total_paid = self
            .schedule
            .iter()
            .try_fold(Money::ZERO, |acc, i| acc.checked_add(i.payment))?;

        Some(ScheduleSummary {
            payment: first.payment,
            total_interest,
            total_paid,
            periods: u32::try_from(self.schedule.len()).ok()?,
        })
    }
}
