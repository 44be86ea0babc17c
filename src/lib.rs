pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod installment;
pub mod payments;
pub mod rates;
pub mod schedule;
pub mod types;
pub mod validation;
pub mod wallet;

// re-export key types
pub use config::WalletConfig;
pub use decimal::{Money, Rate};
pub use errors::{Result, WalletError};
pub use events::{Event, EventStore};
pub use installment::{FinancialComponent, Installment, InstallmentTerms};
pub use payments::{AmortizationPolicy, AmortizationStatement, ComponentDetail, PaymentOutcome};
pub use rates::{FixedRateTable, RateLookup};
pub use schedule::RecalculationPolicy;
pub use types::{ComponentKind, InstallmentStatus, RateIndex, WalletId};
pub use validation::{component_rules, ValidationEngine, ValidationError, ValidationRule};
pub use wallet::{Wallet, WalletSnapshot};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
