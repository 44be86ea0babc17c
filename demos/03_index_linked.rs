/// index linked - installment values corrected by a market index
use loan_wallet_rs::{
    FixedRateTable, Money, Rate, RateIndex, SafeTimeProvider, TimeSource, Wallet, WalletConfig,
};
use chrono::{Months, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== index-linked wallet ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    ));

    // correction factors an application would fetch from a market service
    let first_due = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let mut rates = FixedRateTable::new();
    rates.set(RateIndex::Cpi, first_due, Rate::from_decimal(dec!(1.0000)));
    for (offset, factor) in [(1, dec!(1.0041)), (2, dec!(1.0083)), (3, dec!(1.0122))] {
        let date = first_due.checked_add_months(Months::new(offset)).unwrap();
        rates.set(RateIndex::Cpi, date, Rate::from_decimal(factor));
    }

    let mut wallet = Wallet::new(WalletConfig::index_linked(Rate::from_percentage(8)));
    wallet.contract_index_linked(
        Money::from_major(2_000),
        4,
        RateIndex::Cpi,
        first_due,
        &rates,
        &time,
    )?;

    // the same base value revalues as the index moves
    for installment in wallet.installments() {
        let value = installment.current_value(installment.due_date(), &rates)?;
        println!(
            "  #{} due {} values at {}",
            installment.number(),
            installment.due_date(),
            value
        );
    }

    let outstanding = wallet.total_outstanding(first_due, &rates)?;
    println!("\ntotal outstanding as of {}: {}", first_due, outstanding);

    Ok(())
}
