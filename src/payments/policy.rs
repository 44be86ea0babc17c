use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::installment::FinancialComponent;
use crate::types::ComponentKind;

use super::statement::{AmortizationStatement, ComponentDetail};

/// allocation-order strategy governing amortization
///
/// Policies differ only in priority order; that is the single axis of
/// variation, so the set is a closed enum rather than an open hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationPolicy {
    /// penalty -> interest -> fee -> principal
    ArrearsFirst,
    /// principal -> fee -> interest -> penalty
    PrincipalFirst,
}

impl AmortizationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            AmortizationPolicy::ArrearsFirst => "arrears-first",
            AmortizationPolicy::PrincipalFirst => "principal-first",
        }
    }

    /// component kinds in this policy's allocation order
    pub fn priority(&self) -> [ComponentKind; 4] {
        match self {
            AmortizationPolicy::ArrearsFirst => [
                ComponentKind::Penalty,
                ComponentKind::Interest,
                ComponentKind::Fee,
                ComponentKind::Principal,
            ],
            AmortizationPolicy::PrincipalFirst => [
                ComponentKind::Principal,
                ComponentKind::Fee,
                ComponentKind::Interest,
                ComponentKind::Penalty,
            ],
        }
    }

    /// allocate a payment across components in priority order
    ///
    /// Non-positive amounts are a no-op: no mutation, no statement. The
    /// returned statement lists only components actually touched and
    /// guarantees `total_applied <= amount_paid`.
    pub fn apply(
        &self,
        components: &mut [FinancialComponent],
        amount_paid: Money,
        time_provider: &SafeTimeProvider,
    ) -> Option<AmortizationStatement> {
        if !amount_paid.is_positive() {
            return None;
        }

        let mut remaining = amount_paid;
        let mut details = Vec::new();

        'allocation: for kind in self.priority() {
            for component in components.iter_mut().filter(|c| c.kind() == kind) {
                if component.outstanding_balance().is_zero() {
                    continue;
                }

                let balance_before = component.outstanding_balance();
                let applied = component.apply(remaining);
                if applied.is_zero() {
                    continue;
                }

                details.push(ComponentDetail {
                    kind,
                    balance_before,
                    amount_applied: applied,
                    balance_after: component.outstanding_balance(),
                });

                remaining -= applied;
                if remaining.is_zero() {
                    break 'allocation;
                }
            }
        }

        Some(AmortizationStatement::new(
            time_provider.now(),
            amount_paid,
            self.name(),
            details,
        ))
    }
}
