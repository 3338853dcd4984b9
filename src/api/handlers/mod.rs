//! API handlers

pub mod bookings;
pub mod gate;
pub mod health;
pub mod locations;
pub mod slots;
