//! quick start - evaluate one application and print the schedule
use loan_eligibility_rs::{evaluate, Decimal, LoanRequest, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 200M mortgage over ten years at 12%
    let request = LoanRequest::builder()
        .product("mortgage")
        .income(Money::from_major(60_000_000))
        .amount(Money::from_major(200_000_000))
        .term_months(120)
        .rate_percent(Decimal::from(12))
        .build();

    let decision = evaluate(&request);

    if let Some(summary) = decision.summary() {
        println!("monthly payment: {}", summary.payment.round_dp(2));
        println!("total interest:  {}", summary.total_interest.round_dp(2));
    }

    println!("{}", decision.rounded(2).to_json_pretty()?);

    Ok(())
}
