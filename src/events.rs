use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::RecalculationPolicy;
use crate::types::WalletId;

/// all events emitted by wallet operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    WalletContracted {
        wallet_id: WalletId,
        total_value: Money,
        installment_count: u32,
        first_due_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    PaymentReceived {
        wallet_id: WalletId,
        installment_number: u32,
        amount: Money,
        total_applied: Money,
        unused_amount: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentRejected {
        wallet_id: WalletId,
        installment_number: u32,
        error_count: usize,
        timestamp: DateTime<Utc>,
    },
    InstallmentSettled {
        wallet_id: WalletId,
        installment_number: u32,
        timestamp: DateTime<Utc>,
    },
    ScheduleRecalculated {
        wallet_id: WalletId,
        policy: RecalculationPolicy,
        replaced_from: u32,
        replaced_count: u32,
        remaining_principal: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
