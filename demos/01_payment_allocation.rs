/// payment allocation - how the two policies split one payment
use loan_wallet_rs::{
    AmortizationPolicy, ComponentKind, FinancialComponent, Money, SafeTimeProvider, TimeSource,
};
use chrono::{TimeZone, Utc};

fn arrears_components() -> Vec<FinancialComponent> {
    vec![
        FinancialComponent::new(ComponentKind::Penalty, Money::from_major(15)),
        FinancialComponent::new(ComponentKind::Interest, Money::from_major(30)),
        FinancialComponent::new(ComponentKind::Fee, Money::from_major(5)),
        FinancialComponent::new(ComponentKind::Principal, Money::from_major(100)),
    ]
}

fn show(policy: AmortizationPolicy, time: &SafeTimeProvider) {
    let mut components = arrears_components();
    let payment = Money::from_major(60);

    println!("=== {} ===", policy.name());
    let statement = policy.apply(&mut components, payment, time).unwrap();

    for detail in statement.details() {
        println!(
            "  {}: {} -> {} (applied {})",
            detail.kind, detail.balance_before, detail.balance_after, detail.amount_applied
        );
    }
    println!(
        "  total applied: {}, unused: {}\n",
        statement.total_applied(),
        statement.unused_amount()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    ));

    // same components, same $60 payment, different priority orders
    show(AmortizationPolicy::ArrearsFirst, &time);
    show(AmortizationPolicy::PrincipalFirst, &time);

    Ok(())
}
