/// quick start - minimal example to get started
use loan_wallet_rs::{Money, Rate, SafeTimeProvider, TimeSource, Wallet, WalletConfig};
use chrono::{NaiveDate, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    ));

    // contract a $12,000 loan across 12 monthly installments
    let mut wallet = Wallet::new(WalletConfig::standard(Rate::from_percentage(12)));
    wallet.contract_fixed(
        Money::from_major(12_000),
        12,
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        &time,
    )?;

    // pay the first installment in full
    let outcome = wallet.receive_payment(1, Money::from_major(1_000), &time)?;
    if let Some(statement) = outcome.statement() {
        println!(
            "applied {} via {} policy",
            statement.total_applied(),
            statement.policy_name()
        );
    }

    // print current state
    println!("{}", wallet.json());

    Ok(())
}
