use chrono::NaiveDate;
use std::collections::HashMap;

use crate::decimal::Rate;
use crate::errors::{Result, WalletError};
use crate::types::RateIndex;

/// market-index lookup capability
///
/// Injected into value computation and index-linked contracting. The core
/// calls it synchronously; retries, timeouts, and caching belong to the
/// implementing layer.
pub trait RateLookup {
    /// correction factor for an index as of a reference date
    ///
    /// Fails with [`WalletError::RateUnavailable`] when the index/date
    /// combination cannot be resolved.
    fn correction_factor(&self, index: RateIndex, reference_date: NaiveDate) -> Result<Rate>;
}

/// in-memory lookup table for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct FixedRateTable {
    factors: HashMap<(RateIndex, NaiveDate), Rate>,
}

impl FixedRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: RateIndex, reference_date: NaiveDate, factor: Rate) {
        self.factors.insert((index, reference_date), factor);
    }
}

impl RateLookup for FixedRateTable {
    fn correction_factor(&self, index: RateIndex, reference_date: NaiveDate) -> Result<Rate> {
        self.factors
            .get(&(index, reference_date))
            .copied()
            .ok_or(WalletError::RateUnavailable {
                index,
                reference_date,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_table_resolves_known_factor() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut table = FixedRateTable::new();
        table.set(RateIndex::Cpi, date, Rate::from_decimal(dec!(1.0312)));

        let factor = table.correction_factor(RateIndex::Cpi, date).unwrap();
        assert_eq!(factor.as_decimal(), dec!(1.0312));
    }

    #[test]
    fn test_unknown_combination_is_a_lookup_error() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let table = FixedRateTable::new();

        let err = table.correction_factor(RateIndex::Prime, date).unwrap_err();
        assert_eq!(
            err,
            WalletError::RateUnavailable {
                index: RateIndex::Prime,
                reference_date: date,
            }
        );
    }
}
