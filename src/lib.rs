//! # SmartPark Coordination Service
//!
//! Booking-availability engine and single-slot gate-command handoff for
//! physical parking slots.
//!
//! ## Architecture
//!
//! - **domain**: core entities (areas, bookings, gate registers) and port
//!   traits (ticket validation)
//! - **application**: availability engine, gate command channel, gate and
//!   booking services
//! - **infrastructure**: record store adapter (tabular, spreadsheet-like)
//!   and the HTTP ticket-validation client
//! - **api**: REST API with Swagger documentation
//!
//! Gate hardware has no inbound connection to this service; it polls
//! `GET /get-gate-command`, a read that consumes the pending command.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use api::{create_api_router, ApiState};

// Re-export store types for easy access
pub use infrastructure::{InMemoryRecordStore, RecordStore};
