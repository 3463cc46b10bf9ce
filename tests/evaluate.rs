use std::sync::Arc;
use std::thread;

use loan_eligibility_rs::{
    evaluate, Decimal, EligibilityError, EligibilityPolicy, LoanDecision, LoanEvaluator,
    LoanRequest, Money, ProductType,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn request(product: &str, income: i64, amount: i64, term: i64, rate: Decimal) -> LoanRequest {
    LoanRequest::builder()
        .product(product)
        .income(Money::from_major(income))
        .amount(Money::from_major(amount))
        .term_months(term)
        .rate_percent(rate)
        .build()
}

fn assert_rejected(decision: &LoanDecision, message: &str) {
    assert!(!decision.is_approved());
    assert_eq!(decision.approved_amount(), Money::ZERO);
    assert_eq!(decision.error_message(), Some(message));
    assert!(decision.schedule().is_empty());
}

#[test]
fn approves_in_range_requests_for_every_product() {
    let cases = [
        ("mortgage", 60_000_000, 200_000_000),
        ("auto", 10_000_000, 30_000_000),
        ("unsecured-personal", 10_000_000, 15_000_000),
        ("personal", 10_000_000, 5_000_000),
    ];

    for (product, income, amount) in cases {
        let decision = evaluate(&request(product, income, amount, 36, dec!(12)));

        assert!(decision.is_approved(), "{product} should be approved");
        assert_eq!(decision.approved_amount(), Money::from_major(amount));
        assert_eq!(decision.error_message(), None);
        assert_eq!(decision.schedule().len(), 36);
    }
}

#[test]
fn mortgage_example() {
    let decision = evaluate(&request("mortgage", 60_000_000, 200_000_000, 120, dec!(12)));

    assert!(decision.is_approved());
    let schedule = decision.schedule();
    assert_eq!(schedule.len(), 120);
    assert_eq!(schedule[0].interest, Money::from_major(2_000_000));
    assert_eq!(schedule[119].remaining_balance, Money::ZERO);
}

#[test]
fn auto_example_exceeds_maximum() {
    let decision = evaluate(&request("auto", 10_000_000, 40_000_000, 60, dec!(12)));
    assert_rejected(&decision, "requested amount exceeds the maximum allowed");
}

#[test]
fn empty_product_rejected_regardless_of_other_fields() {
    assert_rejected(
        &evaluate(&request("", 60_000_000, 200_000_000, 120, dec!(12))),
        "product type is required",
    );
    assert_rejected(
        &evaluate(&request("", -1, 0, 0, dec!(0))),
        "product type is required",
    );
}

#[test]
fn unrecognized_product_rejected_with_dedicated_message() {
    let decision = evaluate(&request("student-loan", 60_000_000, 20_000_000, 60, dec!(12)));
    assert_rejected(&decision, "invalid product type");
    assert_eq!(
        decision.rejection(),
        Some(&EligibilityError::InvalidProductType {
            tag: "student-loan".to_string()
        })
    );
}

#[test]
fn product_tags_are_case_sensitive() {
    let decision = evaluate(&request("Mortgage", 60_000_000, 200_000_000, 120, dec!(12)));
    assert_rejected(&decision, "invalid product type");
}

#[test]
fn validation_runs_before_limit_resolution() {
    let cases = [
        (request("student-loan", 0, 1, 1, dec!(1)), "annual income must be greater than zero"),
        (request("student-loan", 1, -5, 1, dec!(1)), "requested amount must be greater than zero"),
        (request("student-loan", 1, 1, 0, dec!(1)), "term must be greater than zero"),
        (request("student-loan", 1, 1, 1, dec!(-2)), "interest rate must be greater than zero"),
        (request("mortgage", 1, 1, -12, dec!(12)), "term must be greater than zero"),
    ];

    for (request, message) in cases {
        let decision = evaluate(&request);
        assert_rejected(&decision, message);
        assert!(decision.rejection().map(|e| e.is_validation()).unwrap_or(false));
    }
}

#[test]
fn below_minimum_embeds_the_floor() {
    let cases = [
        ("mortgage", 49_999_999, "requested amount must be at least 50000000"),
        ("auto", 4_000_000, "requested amount must be at least 5000000"),
        ("unsecured-personal", 999_999, "requested amount must be at least 1000000"),
        ("personal", 100_000, "requested amount must be at least 500000"),
    ];

    for (product, amount, message) in cases {
        assert_rejected(&evaluate(&request(product, 100_000_000, amount, 12, dec!(10))), message);
    }
}

#[test]
fn schedule_properties_hold() {
    let decision = evaluate(&request("unsecured-personal", 20_000_000, 25_000_000, 48, dec!(21.9)));
    let schedule = decision.schedule();
    let payment = schedule[0].payment;

    let mut previous = Money::from_major(25_000_000);
    for (index, row) in schedule.iter().enumerate() {
        assert_eq!(row.period as usize, index + 1);
        assert_eq!(row.payment, payment);
        assert!(!row.remaining_balance.is_negative());
        assert!(row.remaining_balance <= previous);
        previous = row.remaining_balance;
    }

    let interest: Money = schedule.iter().map(|r| r.interest).sum();
    let principal: Money = schedule.iter().map(|r| r.principal).sum();
    let expected = payment * Decimal::from(48);
    assert!((interest + principal - expected).abs() < Money::from_decimal(dec!(0.0001)));
    assert_eq!(schedule[47].remaining_balance, Money::ZERO);

    let summary = decision.summary().unwrap();
    assert_eq!(summary.periods, 48);
    assert_eq!(summary.total_interest, interest);
    assert!((summary.total_paid - expected).abs() < Money::from_decimal(dec!(0.0001)));
}

#[test]
fn evaluation_is_idempotent() {
    let request = request("personal", 36_000_000, 12_000_000, 18, dec!(16.4));
    assert_eq!(evaluate(&request), evaluate(&request));
    assert_eq!(
        evaluate(&request).to_json_pretty().unwrap(),
        evaluate(&request).to_json_pretty().unwrap()
    );
}

#[test]
fn evaluator_shared_across_threads() {
    let evaluator = Arc::new(LoanEvaluator::default());
    let expected = evaluator.evaluate(&request("auto", 12_000_000, 20_000_000, 60, dec!(13)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let evaluator = Arc::clone(&evaluator);
            thread::spawn(move || evaluator.evaluate(&request("auto", 12_000_000, 20_000_000, 60, dec!(13))))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn request_and_policy_from_json() {
    let policy = EligibilityPolicy::from_json(
        r#"{
            "mortgage": {"minimum": "10000000", "income_multiplier": "5"},
            "auto": {"minimum": "1000000", "income_multiplier": "2"},
            "unsecured_personal": {"minimum": "500000", "income_multiplier": "1"},
            "personal": {"minimum": "100000", "income_multiplier": "4", "income_divisor": "12"}
        }"#,
    )
    .unwrap();
    let evaluator = LoanEvaluator::new(policy);

    let request = LoanRequest::from_json(
        r#"{
            "product_type": "auto",
            "annual_income": "10000000",
            "requested_amount": "25000000",
            "term_months": 36,
            "annual_interest_rate": "12"
        }"#,
    )
    .unwrap();

    assert_rejected(&evaluator.evaluate(&request), "requested amount exceeds the maximum allowed");
    assert_eq!(
        evaluator
            .limits_for(&ProductType::Auto, Money::from_major(10_000_000))
            .unwrap()
            .maximum,
        Money::from_major(20_000_000)
    );
}

fn money(s: &str) -> Money {
    Money::from_str_exact(s).unwrap()
}

#[test]
fn income_too_large_to_scale_leaves_product_uncapped() {
    let request = LoanRequest::builder()
        .product("mortgage")
        .income(money("20000000000000000000000000000"))
        .amount(Money::from_major(100_000_000))
        .term_months(12)
        .rate_percent(dec!(12))
        .build();
    let decision = evaluate(&request);

    assert!(decision.is_approved());
    assert_eq!(decision.schedule().len(), 12);
    assert_eq!(decision.schedule()[11].remaining_balance, Money::ZERO);
}

#[test]
fn amount_near_decimal_limit_still_yields_a_decision() {
    let huge = money("79000000000000000000000000000");
    let request = LoanRequest::builder()
        .product("auto")
        .income(huge)
        .amount(huge)
        .term_months(12)
        .rate_percent(dec!(12))
        .build();
    let decision = evaluate(&request);

    assert!(decision.is_approved());
    assert_eq!(decision.approved_amount(), huge);
    // twelve payments together do not fit in a decimal
    assert!(decision.summary().is_none());
}

#[test]
fn unrepresentable_payment_is_rejected() {
    let huge = money("79000000000000000000000000000");
    let request = LoanRequest::builder()
        .product("auto")
        .income(huge)
        .amount(huge)
        .term_months(12)
        .rate_percent(dec!(2400))
        .build();
    let decision = evaluate(&request);

    assert!(!decision.is_approved());
    assert!(decision.schedule().is_empty());
    assert!(matches!(
        decision.rejection(),
        Some(EligibilityError::InvalidSchedule { .. })
    ));
}

#[test]
fn positive_rate_that_vanishes_is_not_reported_as_non_positive() {
    let decision = evaluate(&request(
        "mortgage",
        60_000_000,
        200_000_000,
        120,
        dec!(0.0000000000000000000000000001),
    ));

    assert!(!decision.is_approved());
    assert_ne!(
        decision.error_message(),
        Some("interest rate must be greater than zero")
    );
    assert!(matches!(
        decision.rejection(),
        Some(EligibilityError::InvalidRequest { .. })
    ));
}

#[test]
fn huge_terms_are_rejected_without_building_a_schedule() {
    for term in [1_201, 4_000_000_000, i64::MAX] {
        let decision = evaluate(&request("mortgage", 60_000_000, 200_000_000, term, dec!(12)));
        assert_rejected(
            &decision,
            &format!("invalid request: term of {term} months exceeds the maximum of 1200"),
        );
    }

    let decision = evaluate(&request("mortgage", 60_000_000, 200_000_000, 1_200, dec!(12)));
    assert!(decision.is_approved());
    assert_eq!(decision.schedule().len(), 1_200);
}
