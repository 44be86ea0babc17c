use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a wallet
pub type WalletId = Uuid;

/// typed sub-balance of an installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Principal,
    Interest,
    Penalty,
    Fee,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Principal => "principal",
            ComponentKind::Interest => "interest",
            ComponentKind::Penalty => "penalty",
            ComponentKind::Fee => "fee",
        };
        write!(f, "{}", name)
    }
}

/// installment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// obligation still carries a balance
    Open,
    /// fully amortized, terminal
    Paid,
}

/// market indexes resolvable through a rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateIndex {
    Cpi,
    Sofr,
    Prime,
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateIndex::Cpi => "CPI",
            RateIndex::Sofr => "SOFR",
            RateIndex::Prime => "Prime",
        };
        write!(f, "{}", name)
    }
}
