//! Domain errors

use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// The backing record store is unreachable or refused the call.
    /// Never retried automatically; surfaced to clients as a generic 5xx.
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// The ticket-validation service refused the gate action
    /// (ticket invalid, expired or fully used). Terminal for the request.
    #[error("Ticket rejected: {0}")]
    ValidationRejected(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    /// Request rejected before any store or network call was made.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Strict booking mode only: the slot already has an overlapping booking.
    #[error("Slot {slot} in {area} already has an overlapping booking")]
    SlotConflict { area: String, slot: u32 },

    /// A table header or row did not match the expected typed schema.
    #[error("Schema mismatch in table {table}: {detail}")]
    SchemaMismatch { table: &'static str, detail: String },
}
