use chrono::{DateTime, Months, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WalletConfig;
use crate::decimal::Money;
use crate::errors::{Result, WalletError};
use crate::events::{Event, EventStore};
use crate::installment::Installment;
use crate::payments::PaymentOutcome;
use crate::rates::RateLookup;
use crate::types::{ComponentKind, InstallmentStatus, RateIndex, WalletId};

/// serializable summary of one installment for json output
#[derive(Debug, Serialize)]
struct InstallmentView {
    number: u32,
    due_date: NaiveDate,
    status: InstallmentStatus,
    balance: Money,
    principal_balance: Money,
}

/// serializable wallet view for debugging and monitoring
#[derive(Debug, Serialize)]
struct WalletView {
    id: WalletId,
    contracted: bool,
    settled: bool,
    open_installments: usize,
    total_balance: Money,
    installments: Vec<InstallmentView>,
}

/// state snapshot for the audit trail, captured when topology changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub snapshot_id: Uuid,
    pub wallet_id: WalletId,
    pub timestamp: DateTime<Utc>,
    pub trigger: String,
    pub installments: Vec<Installment>,
}

impl WalletSnapshot {
    fn capture(
        wallet_id: WalletId,
        installments: &[Installment],
        trigger: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            wallet_id,
            timestamp,
            trigger: trigger.to_string(),
            installments: installments.to_vec(),
        }
    }
}

/// aggregate root for one loan-servicing contract
///
/// The wallet exclusively owns its installments and is the sole entry point
/// for contracting and payment operations. Mutating operations take
/// `&mut self`, so concurrent payments against one wallet are ruled out at
/// the type level; distinct wallets are independent values.
pub struct Wallet {
    id: WalletId,
    config: WalletConfig,
    installments: Vec<Installment>,
    events: EventStore,
    snapshots: Vec<WalletSnapshot>,
}

impl Wallet {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            installments: Vec::new(),
            events: EventStore::new(),
            snapshots: Vec::new(),
        }
    }

    pub fn id(&self) -> WalletId {
        self.id
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn installment(&self, number: u32) -> Option<&Installment> {
        self.installments.iter().find(|i| i.number() == number)
    }

    pub fn is_contracted(&self) -> bool {
        !self.installments.is_empty()
    }

    /// whether every installment has been paid
    pub fn is_settled(&self) -> bool {
        self.is_contracted() && self.installments.iter().all(|i| !i.is_open())
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    pub fn snapshots(&self) -> &[WalletSnapshot] {
        &self.snapshots
    }

    /// pretty-printed state view for debugging and monitoring
    pub fn to_json_pretty(&self) -> String {
        let view = WalletView {
            id: self.id,
            contracted: self.is_contracted(),
            settled: self.is_settled(),
            open_installments: self.installments.iter().filter(|i| i.is_open()).count(),
            total_balance: self.installments.iter().map(|i| i.balance_total()).sum(),
            installments: self
                .installments
                .iter()
                .map(|i| InstallmentView {
                    number: i.number(),
                    due_date: i.due_date(),
                    status: i.status(),
                    balance: i.balance_total(),
                    principal_balance: i.principal_balance(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }

    /// total value of open installments as of a reference date
    pub fn total_outstanding(&self, as_of: NaiveDate, rates: &dyn RateLookup) -> Result<Money> {
        let mut total = Money::ZERO;
        for installment in self.installments.iter().filter(|i| i.is_open()) {
            total += installment.current_value(as_of, rates)?;
        }
        Ok(total)
    }

    /// contract a fixed-value operation
    ///
    /// Divides `total_value` evenly across `installment_count` fixed
    /// installments with monthly-spaced due dates; the last installment
    /// absorbs the rounding residue so principal sums exactly to
    /// `total_value`. Fails if the wallet was already contracted.
    pub fn contract_fixed(
        &mut self,
        total_value: Money,
        installment_count: u32,
        first_due_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<()> {
        self.ensure_not_contracted()?;
        Self::check_contract_terms(total_value, installment_count)?;

        let share = total_value / Decimal::from(installment_count);
        let mut installments = Vec::with_capacity(installment_count as usize);
        let mut allocated = Money::ZERO;

        for i in 0..installment_count {
            let due_date = due_date_for(first_due_date, i)?;
            let amount = if i + 1 == installment_count {
                total_value - allocated
            } else {
                share
            };
            installments.push(Installment::fixed(i + 1, due_date, amount));
            allocated += amount;
        }

        self.installments = installments;
        let now = time_provider.now();
        self.events.emit(Event::WalletContracted {
            wallet_id: self.id,
            total_value,
            installment_count,
            first_due_date,
            timestamp: now,
        });
        self.snapshots.push(WalletSnapshot::capture(
            self.id,
            &self.installments,
            "contracted",
            now,
        ));

        Ok(())
    }

    /// contract an index-linked operation
    ///
    /// Every installment shares the same base value and index and carries
    /// its own due date. The index/date combination is resolved through the
    /// injected lookup up front; an unavailable index fails the operation
    /// before any installment is created.
    pub fn contract_index_linked(
        &mut self,
        base_value: Money,
        installment_count: u32,
        index: RateIndex,
        first_due_date: NaiveDate,
        rates: &dyn RateLookup,
        time_provider: &SafeTimeProvider,
    ) -> Result<()> {
        self.ensure_not_contracted()?;
        Self::check_contract_terms(base_value, installment_count)?;
        rates.correction_factor(index, first_due_date)?;

        let mut installments = Vec::with_capacity(installment_count as usize);
        for i in 0..installment_count {
            let due_date = due_date_for(first_due_date, i)?;
            installments.push(Installment::index_linked(i + 1, due_date, base_value, index));
        }

        self.installments = installments;
        let now = time_provider.now();
        self.events.emit(Event::WalletContracted {
            wallet_id: self.id,
            total_value: base_value * Decimal::from(installment_count),
            installment_count,
            first_due_date,
            timestamp: now,
        });
        self.snapshots.push(WalletSnapshot::capture(
            self.id,
            &self.installments,
            "contracted",
            now,
        ));

        Ok(())
    }

    /// receive a payment against one open installment
    ///
    /// Referencing a nonexistent or settled installment is a fatal
    /// precondition violation. Business-rule failures come back as
    /// [`PaymentOutcome::Rejected`] with the complete error list and zero
    /// mutation; a non-positive amount is declined by the policy as
    /// [`PaymentOutcome::Skipped`].
    pub fn receive_payment(
        &mut self,
        installment_number: u32,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentOutcome> {
        let wallet_id = self.id;
        let policy = self.config.amortization;
        let engine = &self.config.component_rules;

        let installment = find_open(&mut self.installments, installment_number)?;

        if let Err(errors) = engine.validate_all(installment.components().iter()) {
            self.events.emit(Event::PaymentRejected {
                wallet_id,
                installment_number,
                error_count: errors.len(),
                timestamp: time_provider.now(),
            });
            return Ok(PaymentOutcome::Rejected(errors));
        }

        let statement = match policy.apply(installment.components_mut(), amount, time_provider) {
            Some(statement) => statement,
            None => return Ok(PaymentOutcome::Skipped),
        };

        let settled = installment.mark_paid_if_settled();

        self.events.emit(Event::PaymentReceived {
            wallet_id,
            installment_number,
            amount,
            total_applied: statement.total_applied(),
            unused_amount: statement.unused_amount(),
            timestamp: statement.timestamp(),
        });
        if settled {
            self.events.emit(Event::InstallmentSettled {
                wallet_id,
                installment_number,
                timestamp: statement.timestamp(),
            });
        }

        Ok(PaymentOutcome::Applied(statement))
    }

    /// receive a payment and, on an early principal reduction, regenerate
    /// the remaining schedule
    ///
    /// Requires a configured recalculation policy (checked before any
    /// mutation). When the statement shows principal applied and open
    /// installments remain after the target's due date, that suffix is
    /// recomputed from its outstanding principal, remaining term, and the
    /// contract rate, then replaced in one step: the replacement sequence is
    /// fully built before the wallet's topology changes, so the operation
    /// either completes or leaves the prior schedule intact. Paid
    /// installments and the target itself are never touched.
    pub fn amortize_early(
        &mut self,
        installment_number: u32,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentOutcome> {
        let policy = self
            .config
            .recalculation
            .ok_or(WalletError::RecalculationUnavailable)?;

        let outcome = self.receive_payment(installment_number, amount, time_provider)?;
        let statement = match &outcome {
            PaymentOutcome::Applied(statement) => statement,
            _ => return Ok(outcome),
        };
        if statement.applied_to(ComponentKind::Principal).is_zero() {
            return Ok(outcome);
        }

        let target_due = match self.installment(installment_number) {
            Some(installment) => installment.due_date(),
            None => return Ok(outcome),
        };

        let split = self
            .installments
            .partition_point(|i| i.due_date() <= target_due);
        let suffix = &self.installments[split..];
        if suffix.is_empty() || suffix.iter().any(|i| !i.is_open()) {
            return Ok(outcome);
        }

        let remaining_principal: Money = suffix.iter().map(|i| i.principal_balance()).sum();
        let replaced_count = suffix.len() as u32;
        let first_number = suffix[0].number();
        let first_due_date = suffix[0].due_date();

        let replacement = policy.recompute(
            remaining_principal,
            replaced_count,
            self.config.interest_rate,
            first_number,
            first_due_date,
        )?;

        self.installments.truncate(split);
        self.installments.extend(replacement);

        let now = time_provider.now();
        self.events.emit(Event::ScheduleRecalculated {
            wallet_id: self.id,
            policy,
            replaced_from: first_number,
            replaced_count,
            remaining_principal,
            timestamp: now,
        });
        self.snapshots.push(WalletSnapshot::capture(
            self.id,
            &self.installments,
            "schedule recalculated",
            now,
        ));

        Ok(outcome)
    }

    fn ensure_not_contracted(&self) -> Result<()> {
        if self.is_contracted() {
            Err(WalletError::AlreadyContracted { wallet_id: self.id })
        } else {
            Ok(())
        }
    }

    fn check_contract_terms(value: Money, installment_count: u32) -> Result<()> {
        if installment_count == 0 {
            return Err(WalletError::InvalidConfiguration {
                message: "installment count must be positive".to_string(),
            });
        }
        if !value.is_positive() {
            return Err(WalletError::InvalidConfiguration {
                message: format!("contract value must be positive, got {}", value),
            });
        }
        Ok(())
    }
}

fn find_open(installments: &mut [Installment], number: u32) -> Result<&mut Installment> {
    match installments.iter_mut().find(|i| i.number() == number) {
        Some(installment) if installment.is_open() => Ok(installment),
        Some(_) => Err(WalletError::InstallmentAlreadySettled { number }),
        None => Err(WalletError::InstallmentNotFound { number }),
    }
}

fn due_date_for(first_due_date: NaiveDate, offset: u32) -> Result<NaiveDate> {
    first_due_date
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| WalletError::InvalidDate {
            message: format!("due date overflow {} months after {}", offset, first_due_date),
        })
}
