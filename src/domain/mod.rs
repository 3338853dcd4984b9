//! Domain layer - core entities and port traits

pub mod area;
pub mod booking;
pub mod error;
pub mod gate;
pub mod ports;

// Re-export commonly used types
pub use area::{Area, AreaRegistry};
pub use booking::Booking;
pub use error::{DomainError, DomainResult};
pub use gate::{GateAction, GateCommand, GateRegister};
pub use ports::{Authorization, TicketValidator};
