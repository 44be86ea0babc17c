use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::ComponentKind;

/// per-component line of an amortization statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDetail {
    pub kind: ComponentKind,
    pub balance_before: Money,
    pub amount_applied: Money,
    pub balance_after: Money,
}

/// immutable audit record of one payment event
///
/// Constructed only by an amortization policy's allocation step and handed
/// out as a freely shareable snapshot with no back-reference to the wallet.
/// Holds `total_applied + unused_amount == amount_paid` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationStatement {
    transaction_id: Uuid,
    timestamp: DateTime<Utc>,
    amount_paid: Money,
    policy_name: String,
    details: Vec<ComponentDetail>,
    total_applied: Money,
    unused_amount: Money,
}

impl AmortizationStatement {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        amount_paid: Money,
        policy_name: &str,
        details: Vec<ComponentDetail>,
    ) -> Self {
        let total_applied = details.iter().map(|d| d.amount_applied).sum();
        Self {
            transaction_id: Uuid::new_v4(),
            timestamp,
            amount_paid,
            policy_name: policy_name.to_string(),
            details,
            total_applied,
            unused_amount: amount_paid - total_applied,
        }
    }

    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// components actually touched, in the policy's priority order
    pub fn details(&self) -> &[ComponentDetail] {
        &self.details
    }

    pub fn total_applied(&self) -> Money {
        self.total_applied
    }

    pub fn unused_amount(&self) -> Money {
        self.unused_amount
    }

    /// amount this payment applied to a component kind
    pub fn applied_to(&self, kind: ComponentKind) -> Money {
        self.details
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.amount_applied)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(kind: ComponentKind, before: i64, applied: i64) -> ComponentDetail {
        ComponentDetail {
            kind,
            balance_before: Money::from_major(before),
            amount_applied: Money::from_major(applied),
            balance_after: Money::from_major(before - applied),
        }
    }

    #[test]
    fn test_statement_arithmetic_is_exact() {
        let statement = AmortizationStatement::new(
            Utc::now(),
            Money::from_major(50),
            "arrears-first",
            vec![
                detail(ComponentKind::Interest, 30, 30),
                detail(ComponentKind::Principal, 100, 20),
            ],
        );

        assert_eq!(statement.total_applied(), Money::from_major(50));
        assert_eq!(statement.unused_amount(), Money::ZERO);
        assert_eq!(
            statement.total_applied() + statement.unused_amount(),
            statement.amount_paid()
        );
    }

    #[test]
    fn test_unused_amount_records_excess() {
        let statement = AmortizationStatement::new(
            Utc::now(),
            Money::from_major(100),
            "arrears-first",
            vec![detail(ComponentKind::Principal, 80, 80)],
        );

        assert_eq!(statement.unused_amount(), Money::from_major(20));
        assert_eq!(statement.applied_to(ComponentKind::Principal), Money::from_major(80));
        assert_eq!(statement.applied_to(ComponentKind::Fee), Money::ZERO);
    }

    #[test]
    fn test_statement_serializes_round_trip() {
        let statement = AmortizationStatement::new(
            Utc::now(),
            Money::from_major(50),
            "principal-first",
            vec![detail(ComponentKind::Principal, 50, 50)],
        );

        let json = serde_json::to_string(&statement).unwrap();
        let back: AmortizationStatement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, statement);
    }
}
