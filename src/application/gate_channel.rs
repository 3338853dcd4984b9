//! Gate command channel
//!
//! A depth-one message-passing protocol between the server and poll-only
//! gate hardware. Each gate has one register row `(gate_id, command,
//! booking_id)` in the `GateControl` table:
//!
//! - `deposit` moves the register to PENDING, overwriting any unconsumed
//!   command without acknowledgment (last-write-wins by design).
//! - `poll_and_consume` reads the register and, iff it holds `OPEN`,
//!   resets it to `NONE` in the same call.
//!
//! The tabular store offers no compare-and-reset, so the read-then-clear
//! sequence is serialized behind a per-gate in-process mutex. That closes
//! the duplicate-open race between concurrent polls hitting this process;
//! a second process writing the same register could still race, which is
//! a documented residual risk of the backing store.

use std::sync::Arc;

use dashmap::DashMap;
use metrics::counter;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{DomainResult, GateCommand, GateRegister};
use crate::infrastructure::store::{RecordStore, GATE_CONTROL_TABLE};

/// What a poll observed (and consumed, if it was `Open`).
#[derive(Debug, Clone, PartialEq)]
pub struct PolledCommand {
    pub command: GateCommand,
    pub booking_id: Option<String>,
}

impl PolledCommand {
    fn none() -> Self {
        Self {
            command: GateCommand::None,
            booking_id: None,
        }
    }
}

pub struct GateCommandChannel {
    store: Arc<dyn RecordStore>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl GateCommandChannel {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, gate_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(gate_id.to_string())
            .or_default()
            .clone()
    }

    /// Deposit an `OPEN` command for `gate_id`.
    ///
    /// Overwrites any pending command: the register is a depth-one channel
    /// and the prior instruction is silently dropped.
    pub async fn deposit(&self, gate_id: &str, booking_id: &str) -> DomainResult<()> {
        let lock = self.lock_for(gate_id);
        let _guard = lock.lock().await;

        let register = GateRegister::pending(gate_id, booking_id);
        self.store
            .write_row(GATE_CONTROL_TABLE, gate_id, register.to_row())
            .await?;

        counter!("gate_commands_deposited_total").increment(1);
        info!(gate_id, booking_id, "deposited OPEN command");
        Ok(())
    }

    /// Read the register for `gate_id` and consume a pending `OPEN`.
    ///
    /// Returns what was observed; on an idle register this is a no-op
    /// returning `NONE`. Polling is the hardware's only input channel, so
    /// gate latency is bounded by the hardware's poll interval.
    pub async fn poll_and_consume(&self, gate_id: &str) -> DomainResult<PolledCommand> {
        let lock = self.lock_for(gate_id);
        let _guard = lock.lock().await;

        counter!("gate_polls_total").increment(1);

        let rows = self.store.read_rows(GATE_CONTROL_TABLE).await?;
        let register = rows
            .iter()
            .skip(1)
            .filter(|r| r.first().map(String::as_str) == Some(gate_id))
            .find_map(|r| GateRegister::from_row(r));

        let Some(register) = register else {
            debug!(gate_id, "poll on unknown gate register");
            return Ok(PolledCommand::none());
        };

        if register.command != GateCommand::Open {
            return Ok(PolledCommand::none());
        }

        // Clear within the same serialized section (read-then-clear).
        self.store
            .write_row(GATE_CONTROL_TABLE, gate_id, GateRegister::idle(gate_id).to_row())
            .await?;

        counter!("gate_commands_consumed_total").increment(1);
        info!(gate_id, booking_id = ?register.booking_id, "OPEN command consumed by poll");
        Ok(PolledCommand {
            command: GateCommand::Open,
            booking_id: register.booking_id,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
