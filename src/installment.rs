use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::rates::RateLookup;
use crate::types::{ComponentKind, InstallmentStatus, RateIndex};

/// mutable value slice of an installment
///
/// Balances only ever decrease, and only through an amortization policy's
/// allocation step. Invariant: `0 <= outstanding_balance <= original_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialComponent {
    kind: ComponentKind,
    original_amount: Money,
    outstanding_balance: Money,
}

impl FinancialComponent {
    /// create a component with its full balance outstanding
    pub fn new(kind: ComponentKind, amount: Money) -> Self {
        Self {
            kind,
            original_amount: amount,
            outstanding_balance: amount,
        }
    }

    /// create a component with an explicit balance (e.g., rehydration)
    pub fn with_balance(kind: ComponentKind, original_amount: Money, balance: Money) -> Self {
        Self {
            kind,
            original_amount,
            outstanding_balance: balance,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn original_amount(&self) -> Money {
        self.original_amount
    }

    pub fn outstanding_balance(&self) -> Money {
        self.outstanding_balance
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding_balance.is_zero()
    }

    /// reduce the balance by up to `amount`, returning what was applied
    pub(crate) fn apply(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.outstanding_balance).max(Money::ZERO);
        self.outstanding_balance -= applied;
        applied
    }
}

/// variant-specific contract terms of an installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentTerms {
    /// constant value set at contracting time
    Fixed { amount: Money },
    /// base value corrected by a market index factor at valuation time
    IndexLinked { base_amount: Money, index: RateIndex },
}

/// one scheduled payment obligation within a wallet
///
/// Installments never reference their owning wallet or sibling installments;
/// cross-installment behavior is orchestrated by the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    number: u32,
    due_date: NaiveDate,
    status: InstallmentStatus,
    components: Vec<FinancialComponent>,
    terms: InstallmentTerms,
}

impl Installment {
    /// fixed-value installment with a single principal component
    pub fn fixed(number: u32, due_date: NaiveDate, amount: Money) -> Self {
        Self::fixed_with_components(
            number,
            due_date,
            vec![FinancialComponent::new(ComponentKind::Principal, amount)],
        )
    }

    /// fixed-value installment with an explicit component breakdown
    pub fn fixed_with_components(
        number: u32,
        due_date: NaiveDate,
        components: Vec<FinancialComponent>,
    ) -> Self {
        let amount = components.iter().map(|c| c.original_amount()).sum();
        Self {
            number,
            due_date,
            status: InstallmentStatus::Open,
            components,
            terms: InstallmentTerms::Fixed { amount },
        }
    }

    /// index-linked installment carrying its base value as principal
    pub fn index_linked(
        number: u32,
        due_date: NaiveDate,
        base_amount: Money,
        index: RateIndex,
    ) -> Self {
        Self {
            number,
            due_date,
            status: InstallmentStatus::Open,
            components: vec![FinancialComponent::new(ComponentKind::Principal, base_amount)],
            terms: InstallmentTerms::IndexLinked { base_amount, index },
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn status(&self) -> InstallmentStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == InstallmentStatus::Open
    }

    pub fn terms(&self) -> &InstallmentTerms {
        &self.terms
    }

    pub fn components(&self) -> &[FinancialComponent] {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut [FinancialComponent] {
        &mut self.components
    }

    /// sum of component balances, uncorrected
    pub fn balance_total(&self) -> Money {
        self.components.iter().map(|c| c.outstanding_balance()).sum()
    }

    /// outstanding principal of this installment
    pub fn principal_balance(&self) -> Money {
        self.components
            .iter()
            .filter(|c| c.kind() == ComponentKind::Principal)
            .map(|c| c.outstanding_balance())
            .sum()
    }

    /// current value as of a reference date
    ///
    /// Fixed terms value at the component balance sum; index-linked terms
    /// correct that sum by the looked-up factor. A lookup failure propagates
    /// as the calling operation's failure, never as a validation error.
    pub fn current_value(&self, as_of: NaiveDate, rates: &dyn RateLookup) -> Result<Money> {
        let balance = self.balance_total();
        match &self.terms {
            InstallmentTerms::Fixed { .. } => Ok(balance),
            InstallmentTerms::IndexLinked { index, .. } => {
                let factor = rates.correction_factor(*index, as_of)?;
                Ok(balance * factor.as_decimal())
            }
        }
    }

    /// transition Open -> Paid once all component balances reach zero
    ///
    /// Returns whether the transition happened. A paid installment never
    /// reopens.
    pub fn mark_paid_if_settled(&mut self) -> bool {
        if self.status == InstallmentStatus::Open && self.balance_total().is_zero() {
            self.status = InstallmentStatus::Paid;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::rates::FixedRateTable;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_component_apply_caps_at_balance() {
        let mut component = FinancialComponent::new(ComponentKind::Interest, Money::from_major(30));

        let applied = component.apply(Money::from_major(50));
        assert_eq!(applied, Money::from_major(30));
        assert_eq!(component.outstanding_balance(), Money::ZERO);
        assert_eq!(component.original_amount(), Money::from_major(30));
    }

    #[test]
    fn test_component_apply_partial() {
        let mut component =
            FinancialComponent::new(ComponentKind::Principal, Money::from_major(100));

        let applied = component.apply(Money::from_major(20));
        assert_eq!(applied, Money::from_major(20));
        assert_eq!(component.outstanding_balance(), Money::from_major(80));
    }

    #[test]
    fn test_fixed_value_is_component_sum() {
        let installment = Installment::fixed_with_components(
            1,
            date(2025, 1, 1),
            vec![
                FinancialComponent::new(ComponentKind::Principal, Money::from_major(100)),
                FinancialComponent::new(ComponentKind::Interest, Money::from_major(12)),
            ],
        );

        assert_eq!(installment.balance_total(), Money::from_major(112));
        assert_eq!(
            installment.terms(),
            &InstallmentTerms::Fixed {
                amount: Money::from_major(112)
            }
        );
    }

    #[test]
    fn test_index_linked_value_applies_correction() {
        let due = date(2025, 6, 1);
        let installment =
            Installment::index_linked(1, due, Money::from_major(100), RateIndex::Cpi);

        let mut rates = FixedRateTable::new();
        rates.set(RateIndex::Cpi, due, Rate::from_decimal(dec!(1.05)));

        let value = installment.current_value(due, &rates).unwrap();
        assert_eq!(value, Money::from_major(105));
    }

    #[test]
    fn test_index_linked_value_fails_without_factor() {
        let installment = Installment::index_linked(
            1,
            date(2025, 6, 1),
            Money::from_major(100),
            RateIndex::Sofr,
        );

        let rates = FixedRateTable::new();
        assert!(installment
            .current_value(date(2025, 6, 1), &rates)
            .is_err());
    }

    #[test]
    fn test_mark_paid_transitions_exactly_once() {
        let mut installment = Installment::fixed(1, date(2025, 1, 1), Money::from_major(10));
        assert!(!installment.mark_paid_if_settled());

        installment.components_mut()[0].apply(Money::from_major(10));
        assert!(installment.mark_paid_if_settled());
        assert_eq!(installment.status(), InstallmentStatus::Paid);

        // second call is a no-op, never reopens or re-fires
        assert!(!installment.mark_paid_if_settled());
    }
}
