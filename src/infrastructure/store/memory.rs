//! In-memory record store for development and testing

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{RecordStore, BOOKINGS_TABLE, GATE_CONTROL_TABLE, PHYSICAL_STATUS_TABLE};
use crate::domain::{DomainError, DomainResult};

/// In-memory tabular store.
///
/// Seeds the standard tables with their header rows so that typed
/// decoding works out of the box. `set_unavailable` simulates a backend
/// outage for exercising the `StoreUnavailable` path.
pub struct InMemoryRecordStore {
    tables: DashMap<String, Vec<Vec<String>>>,
    unavailable: AtomicBool,
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        let tables = DashMap::new();
        tables.insert(
            BOOKINGS_TABLE.to_string(),
            vec![row(&[
                "BookingID",
                "Location",
                "SlotNumber",
                "BookingStartTime",
                "BookingEndTime",
                "PaymentID",
            ])],
        );
        tables.insert(
            GATE_CONTROL_TABLE.to_string(),
            vec![row(&["GateID", "Command", "BookingID"])],
        );
        tables.insert(
            PHYSICAL_STATUS_TABLE.to_string(),
            vec![row(&["SlotNumber", "Status"])],
        );
        Self {
            tables,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate the backing store going away (or coming back).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "simulated backend outage".into(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn read_rows(&self, table: &str) -> DomainResult<Vec<Vec<String>>> {
        self.check_available()?;
        Ok(self
            .tables
            .get(table)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn write_row(&self, table: &str, key: &str, values: Vec<String>) -> DomainResult<()> {
        self.check_available()?;
        let mut rows = self.tables.entry(table.to_string()).or_default();
        // Header row is never keyed; match on the first cell of data rows.
        match rows
            .iter_mut()
            .skip(1)
            .find(|r| r.first().map(String::as_str) == Some(key))
        {
            Some(existing) => *existing = values,
            None => rows.push(values),
        }
        Ok(())
    }

    async fn append_row(&self, table: &str, values: Vec<String>) -> DomainResult<()> {
        self.check_available()?;
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(values);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
