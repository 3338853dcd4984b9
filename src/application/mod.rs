//! Application layer - business logic over the store and the ports

pub mod availability;
pub mod booking_service;
pub mod gate_channel;
pub mod gate_service;

pub use availability::{Availability, AvailabilityEngine};
pub use booking_service::{BookingRequest, BookingService};
pub use gate_channel::{GateCommandChannel, PolledCommand};
pub use gate_service::GateService;
