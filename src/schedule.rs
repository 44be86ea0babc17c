use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, WalletError};
use crate::installment::{FinancialComponent, Installment};
use crate::types::ComponentKind;

/// curve used to regenerate future installments after an early paydown
///
/// Implementations are interchangeable without touching wallet logic; the
/// wallet only relies on the recompute contract below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecalculationPolicy {
    /// constant total payment, declining interest share (Price curve)
    EqualInstallment,
    /// constant principal share, declining payments (SAC curve)
    EqualAmortization,
}

impl RecalculationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            RecalculationPolicy::EqualInstallment => "equal-installment",
            RecalculationPolicy::EqualAmortization => "equal-amortization",
        }
    }

    /// produce a replacement sequence of future installments
    ///
    /// Installments are numbered sequentially from `first_number` with
    /// monthly-spaced due dates starting at `first_due_date`. The principal
    /// components of the produced sequence sum exactly to
    /// `remaining_principal`; the last installment absorbs the rounding
    /// residue. A zero term yields an empty sequence.
    pub fn recompute(
        &self,
        remaining_principal: Money,
        remaining_term: u32,
        annual_rate: Rate,
        first_number: u32,
        first_due_date: NaiveDate,
    ) -> Result<Vec<Installment>> {
        if remaining_term == 0 {
            return Ok(Vec::new());
        }

        let monthly_rate = annual_rate.monthly_rate();
        let level_share = match self {
            RecalculationPolicy::EqualInstallment => {
                level_payment(remaining_principal, monthly_rate, remaining_term)
            }
            RecalculationPolicy::EqualAmortization => {
                remaining_principal / Decimal::from(remaining_term)
            }
        };

        let mut installments = Vec::with_capacity(remaining_term as usize);
        let mut balance = remaining_principal;
        let mut allocated = Money::ZERO;

        for i in 0..remaining_term {
            let due_date = first_due_date
                .checked_add_months(Months::new(i))
                .ok_or_else(|| WalletError::InvalidDate {
                    message: format!("due date overflow {} months after {}", i, first_due_date),
                })?;

            let interest = balance * monthly_rate.as_decimal();
            let is_last = i + 1 == remaining_term;
            let principal = if is_last {
                remaining_principal - allocated
            } else {
                let share = match self {
                    RecalculationPolicy::EqualInstallment => level_share - interest,
                    RecalculationPolicy::EqualAmortization => level_share,
                };
                share.min(remaining_principal - allocated).max(Money::ZERO)
            };

            let mut components =
                vec![FinancialComponent::new(ComponentKind::Principal, principal)];
            if interest.is_positive() {
                components.push(FinancialComponent::new(ComponentKind::Interest, interest));
            }

            installments.push(Installment::fixed_with_components(
                first_number + i,
                due_date,
                components,
            ));

            allocated += principal;
            balance -= principal;
        }

        Ok(installments)
    }
}

/// level total payment for a principal over a term (EMI)
///
/// payment = P * r * (1 + r)^n / ((1 + r)^n - 1); degrades to an even
/// principal split at zero rate.
fn level_payment(principal: Money, monthly_rate: Rate, term: u32) -> Money {
    if monthly_rate.is_zero() {
        return principal / Decimal::from(term);
    }

    let r = monthly_rate.as_decimal();
    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..term {
        compound *= base;
    }

    Money::from_decimal(principal.as_decimal() * r * compound / (compound - Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn principal_sum(installments: &[Installment]) -> Money {
        installments.iter().map(|i| i.principal_balance()).sum()
    }

    #[test]
    fn test_equal_installment_conserves_principal() {
        let installments = RecalculationPolicy::EqualInstallment
            .recompute(
                Money::from_major(5000),
                9,
                Rate::from_percentage(12),
                4,
                date(2025, 4, 1),
            )
            .unwrap();

        assert_eq!(installments.len(), 9);
        assert_eq!(principal_sum(&installments), Money::from_major(5000));
    }

    #[test]
    fn test_equal_installment_level_payments() {
        let installments = RecalculationPolicy::EqualInstallment
            .recompute(
                Money::from_major(10_000),
                12,
                Rate::from_percentage(12),
                1,
                date(2025, 1, 1),
            )
            .unwrap();

        // every period but the last pays the same total
        let first_total = installments[0].balance_total();
        for installment in &installments[..11] {
            assert_eq!(installment.balance_total(), first_total);
        }

        // interest share declines as the balance amortizes
        for pair in installments.windows(2) {
            let interest = |i: &Installment| -> Money {
                i.components()
                    .iter()
                    .filter(|c| c.kind() == ComponentKind::Interest)
                    .map(|c| c.outstanding_balance())
                    .sum()
            };
            assert!(interest(&pair[1]) < interest(&pair[0]));
        }
    }

    #[test]
    fn test_equal_amortization_levels_principal() {
        let installments = RecalculationPolicy::EqualAmortization
            .recompute(
                Money::from_major(9000),
                9,
                Rate::from_percentage(12),
                4,
                date(2025, 4, 1),
            )
            .unwrap();

        for installment in &installments {
            assert_eq!(installment.principal_balance(), Money::from_major(1000));
        }
        assert_eq!(principal_sum(&installments), Money::from_major(9000));
    }

    #[test]
    fn test_awkward_principal_residue_lands_on_last() {
        let principal = Money::from_minor(100_001); // 1000.01
        let installments = RecalculationPolicy::EqualAmortization
            .recompute(principal, 7, Rate::from_percentage(10), 2, date(2025, 2, 15))
            .unwrap();

        assert_eq!(principal_sum(&installments), principal);

        let shares: Vec<Money> = installments.iter().map(|i| i.principal_balance()).collect();
        for share in &shares[..6] {
            assert_eq!(*share, Money::from_str_exact("142.86").unwrap());
        }
        assert_eq!(shares[6], principal - Money::from_str_exact("857.16").unwrap());
    }

    #[test]
    fn test_zero_rate_degrades_to_even_split() {
        let installments = RecalculationPolicy::EqualInstallment
            .recompute(Money::from_major(1200), 12, Rate::ZERO, 1, date(2025, 1, 1))
            .unwrap();

        for installment in &installments {
            assert_eq!(installment.balance_total(), Money::from_major(100));
            // no interest component at zero rate
            assert_eq!(installment.components().len(), 1);
        }
    }

    #[test]
    fn test_numbering_and_monthly_spacing() {
        let installments = RecalculationPolicy::EqualInstallment
            .recompute(
                Money::from_major(300),
                3,
                Rate::from_percentage(6),
                7,
                date(2025, 7, 31),
            )
            .unwrap();

        let numbers: Vec<u32> = installments.iter().map(|i| i.number()).collect();
        assert_eq!(numbers, vec![7, 8, 9]);

        // month arithmetic clamps to shorter months
        assert_eq!(installments[0].due_date(), date(2025, 7, 31));
        assert_eq!(installments[1].due_date(), date(2025, 8, 31));
        assert_eq!(installments[2].due_date(), date(2025, 9, 30));
    }

    #[test]
    fn test_zero_term_is_empty() {
        let installments = RecalculationPolicy::EqualInstallment
            .recompute(
                Money::from_major(500),
                0,
                Rate::from_percentage(12),
                1,
                date(2025, 1, 1),
            )
            .unwrap();
        assert!(installments.is_empty());
    }
}
