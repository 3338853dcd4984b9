//! Record store adapter
//!
//! The durable store is a spreadsheet-like tabular backend: ordered rows
//! of string cells, header row first. It provides no locking and no
//! atomicity across a read followed by a write; every consistency
//! guarantee above it is engineered by the caller (see
//! [`crate::application::GateCommandChannel`]).

use async_trait::async_trait;

use crate::domain::DomainResult;

pub mod memory;
pub mod schema;

pub use memory::InMemoryRecordStore;
pub use schema::BookingSchema;

/// Logical table holding booking rows.
pub const BOOKINGS_TABLE: &str = "Bookings";
/// Logical table holding one gate-command register row per gate.
pub const GATE_CONTROL_TABLE: &str = "GateControl";
/// Logical table with per-slot physical sensor readings.
pub const PHYSICAL_STATUS_TABLE: &str = "PhysicalStatus";

/// Access to the tabular record store.
///
/// Failures from the backend (network, auth) surface as
/// `DomainError::StoreUnavailable` and are never retried here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows of a table in order, header row first.
    /// An unknown table reads as empty.
    async fn read_rows(&self, table: &str) -> DomainResult<Vec<Vec<String>>>;

    /// Upsert the row whose first cell equals `key`.
    ///
    /// Not atomic with respect to a preceding `read_rows`: a concurrent
    /// writer may interleave between the two calls.
    async fn write_row(&self, table: &str, key: &str, values: Vec<String>) -> DomainResult<()>;

    /// Append a row at the end of a table.
    async fn append_row(&self, table: &str, values: Vec<String>) -> DomainResult<()>;
}
