//! Availability DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::Availability;
use crate::domain::{Area, Booking};

/// One parking area with its live availability, for the map view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    /// Total physical slots
    pub total: u32,
    /// `total - occupied`; negative when over-booked (never clamped)
    pub available: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationSummary {
    pub fn from_parts(area: &Area, availability: Availability) -> Self {
        Self {
            id: area.id.clone(),
            name: area.name.clone(),
            total: availability.total,
            available: availability.available,
            lat: area.lat,
            lng: area.lng,
        }
    }
}

/// One booking window within an area, for grid rendering
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotBookingDto {
    pub slot_number: u32,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
}

impl From<&Booking> for SlotBookingDto {
    fn from(b: &Booking) -> Self {
        Self {
            slot_number: b.slot_number,
            start_time: b.start_time.timestamp_millis(),
            end_time: b.end_time.timestamp_millis(),
        }
    }
}

/// Slot-level view of one area: active/future bookings plus the advisory
/// physical-sensor overlay. `physicallyOccupied` is deliberately not
/// folded into availability.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaSlotsResponse {
    pub name: String,
    pub total_slots: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub bookings: Vec<SlotBookingDto>,
    pub physically_occupied: Vec<u32>,
}
