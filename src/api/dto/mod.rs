//! API DTOs

pub mod bookings;
pub mod common;
pub mod gate;
pub mod locations;

pub use bookings::{CreateBookingRequest, CreateBookingResponse};
pub use common::ErrorBody;
pub use gate::{GateCommandQuery, GateCommandResponse, GateControlRequest, GateMessage};
pub use locations::{AreaSlotsResponse, LocationSummary, SlotBookingDto};
