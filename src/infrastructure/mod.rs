//! Infrastructure layer - external concerns

pub mod store;
pub mod validation;

pub use store::{InMemoryRecordStore, RecordStore};
pub use validation::HttpTicketValidator;
