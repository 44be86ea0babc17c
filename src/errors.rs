use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{RateIndex, WalletId};

/// application precondition violations
///
/// These indicate a programming or integration error and travel through the
/// `Err` arm of [`Result`]. Business-rule failures never appear here; they
/// are aggregated [`crate::ValidationError`] lists carried inside
/// [`crate::PaymentOutcome::Rejected`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet {wallet_id} already contracted")]
    AlreadyContracted { wallet_id: WalletId },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("installment not found: {number}")]
    InstallmentNotFound { number: u32 },

    #[error("installment already settled: {number}")]
    InstallmentAlreadySettled { number: u32 },

    #[error("no schedule recalculation policy configured")]
    RecalculationUnavailable,

    #[error("no correction factor for {index} as of {reference_date}")]
    RateUnavailable {
        index: RateIndex,
        reference_date: NaiveDate,
    },

    #[error("invalid date: {message}")]
    InvalidDate { message: String },
}

pub type Result<T> = std::result::Result<T, WalletError>;
