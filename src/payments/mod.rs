pub mod policy;
pub mod statement;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

pub use policy::AmortizationPolicy;
pub use statement::{AmortizationStatement, ComponentDetail};

/// outcome of a payment operation against a wallet
///
/// The success and failure states are structurally exclusive: an applied
/// payment always carries its statement, a rejection always carries the
/// complete non-empty error list, and a skipped payment carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentOutcome {
    /// payment allocated across components
    Applied(AmortizationStatement),
    /// business rules rejected the installment state; nothing was mutated
    Rejected(Vec<ValidationError>),
    /// non-positive amount declined at the policy boundary; nothing to do
    Skipped,
}

impl PaymentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PaymentOutcome::Applied(_))
    }

    pub fn statement(&self) -> Option<&AmortizationStatement> {
        match self {
            PaymentOutcome::Applied(statement) => Some(statement),
            _ => None,
        }
    }
}
