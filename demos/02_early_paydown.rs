/// early paydown - schedule recalculation after an extra principal payment
use loan_wallet_rs::{
    Event, Money, Rate, SafeTimeProvider, TimeSource, Wallet, WalletConfig,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== early paydown ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    ));

    let mut wallet = Wallet::new(WalletConfig::standard(Rate::from_percentage(12)));
    wallet.contract_fixed(
        Money::from_major(12_000),
        12,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        &time,
    )?;

    // settle the first two installments on schedule
    wallet.receive_payment(1, Money::from_major(1_000), &time)?;
    wallet.receive_payment(2, Money::from_major(1_000), &time)?;

    println!("schedule before recalculation:");
    for installment in wallet.installments() {
        println!(
            "  #{:<2} due {} balance {}",
            installment.number(),
            installment.due_date(),
            installment.balance_total()
        );
    }

    // pay installment 3; the principal reduction regenerates 4-12
    let outcome = wallet.amortize_early(3, Money::from_major(1_000), &time)?;
    let statement = outcome.statement().expect("payment applied");
    println!("\npaid installment 3: applied {}", statement.total_applied());

    println!("\nschedule after recalculation:");
    for installment in wallet.installments() {
        println!(
            "  #{:<2} due {} balance {}",
            installment.number(),
            installment.due_date(),
            installment.balance_total()
        );
    }

    for event in wallet.take_events() {
        if let Event::ScheduleRecalculated {
            policy,
            replaced_from,
            replaced_count,
            remaining_principal,
            ..
        } = event
        {
            println!(
                "\nrecalculated {} installments from #{} under {} conserving {}",
                replaced_count,
                replaced_from,
                policy.name(),
                remaining_principal
            );
        }
    }

    Ok(())
}
