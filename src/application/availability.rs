//! Availability engine
//!
//! Computes slot occupancy for an area from the full set of time-windowed
//! booking records. Counts **currently active** bookings only: it does not
//! reserve capacity for future bookings and performs no double-booking
//! prevention (see [`crate::application::BookingService`] for the optional
//! strict write-time check).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{Area, Booking, DomainResult};
use crate::infrastructure::store::{
    schema::decode_bookings, RecordStore, BOOKINGS_TABLE, PHYSICAL_STATUS_TABLE,
};

/// Occupancy snapshot for one area at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub total: u32,
    pub occupied: u32,
    /// `total - occupied`, signed: may be negative when overlapping
    /// bookings exceed capacity. Never clamped.
    pub available: i64,
}

pub struct AvailabilityEngine {
    store: Arc<dyn RecordStore>,
}

impl AvailabilityEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn load_bookings(&self) -> DomainResult<Vec<Booking>> {
        let rows = self.store.read_rows(BOOKINGS_TABLE).await?;
        decode_bookings(&rows)
    }

    fn count_active(bookings: &[Booking], area: &Area, as_of: DateTime<Utc>) -> Availability {
        let occupied = bookings
            .iter()
            .filter(|b| b.location == area.name && b.is_active_at(as_of))
            .count() as u32;
        Availability {
            total: area.total_slots,
            occupied,
            available: i64::from(area.total_slots) - i64::from(occupied),
        }
    }

    /// Occupancy of `area` at `as_of`: a booking occupies a slot iff its
    /// half-open window `[start_time, end_time)` contains `as_of`.
    pub async fn compute_availability(
        &self,
        area: &Area,
        as_of: DateTime<Utc>,
    ) -> DomainResult<Availability> {
        let bookings = self.load_bookings().await?;
        Ok(Self::count_active(&bookings, area, as_of))
    }

    /// Occupancy of every area at `as_of` from a single table read.
    pub async fn compute_all<'a>(
        &self,
        areas: impl IntoIterator<Item = &'a Area>,
        as_of: DateTime<Utc>,
    ) -> DomainResult<Vec<(&'a Area, Availability)>> {
        let bookings = self.load_bookings().await?;
        Ok(areas
            .into_iter()
            .map(|area| (area, Self::count_active(&bookings, area, as_of)))
            .collect())
    }

    /// All bookings for `area` that have not yet ended (`end_time > now`),
    /// for grid rendering. Purely descriptive: no conflict resolution.
    pub async fn list_bookings_for_area(&self, area: &Area) -> DomainResult<Vec<Booking>> {
        let now = Utc::now();
        let mut bookings = self.load_bookings().await?;
        bookings.retain(|b| b.location == area.name && b.end_time > now);
        Ok(bookings)
    }

    /// Slots whose physical sensor currently reports busy.
    ///
    /// Advisory overlay only: deliberately never merged into `available`.
    /// Booked-but-empty and occupied-but-unbooked states stay unreconciled
    /// in this version.
    pub async fn physically_occupied(&self) -> DomainResult<Vec<u32>> {
        let rows = self.store.read_rows(PHYSICAL_STATUS_TABLE).await?;
        let mut slots = Vec::new();
        for row in rows.iter().skip(1) {
            let busy = row
                .get(1)
                .is_some_and(|s| s.eq_ignore_ascii_case("busy"));
            if !busy {
                continue;
            }
            match row.first().map(|c| c.parse::<u32>()) {
                Some(Ok(slot)) => slots.push(slot),
                _ => warn!(?row, "skipping unparseable physical-status row"),
            }
        }
        Ok(slots)
    }
}

// ── Tests ──────────────────────────────────────────────────────
