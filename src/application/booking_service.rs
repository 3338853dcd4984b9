//! Booking write path
//!
//! Records a booking row after payment has been verified upstream
//! (payment itself is out of scope here). By default the write is
//! relaxed, exactly like the availability engine assumes: overlapping
//! bookings for the same `(area, slot)` are accepted and the engine
//! reports the resulting over-occupancy honestly. Strict mode
//! (`booking.strict_slot_conflicts` in config) rejects such overlaps
//! with `SlotConflict` instead.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::booking::new_booking_id;
use crate::domain::{Area, AreaRegistry, Booking, DomainError, DomainResult};
use crate::infrastructure::store::{schema::decode_bookings, RecordStore, BOOKINGS_TABLE};

/// A validated request to record one booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub area_id: String,
    pub slot_number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

pub struct BookingService {
    store: Arc<dyn RecordStore>,
    areas: Arc<AreaRegistry>,
    strict_slot_conflicts: bool,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        areas: Arc<AreaRegistry>,
        strict_slot_conflicts: bool,
    ) -> Self {
        Self {
            store,
            areas,
            strict_slot_conflicts,
        }
    }

    /// Record a booking and return it with its generated id.
    pub async fn create_booking(&self, request: BookingRequest) -> DomainResult<Booking> {
        if request.start_time >= request.end_time {
            return Err(DomainError::MalformedRequest(
                "startTime must be before endTime".into(),
            ));
        }

        let area = self
            .areas
            .by_id(&request.area_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "area",
                id: request.area_id.clone(),
            })?;

        if self.strict_slot_conflicts {
            self.check_slot_conflict(area, &request).await?;
        }

        let booking = Booking {
            booking_id: new_booking_id(),
            location: area.name.clone(),
            slot_number: request.slot_number,
            start_time: request.start_time,
            end_time: request.end_time,
        };
        booking.validate()?;

        self.store
            .append_row(
                BOOKINGS_TABLE,
                vec![
                    booking.booking_id.clone(),
                    booking.location.clone(),
                    booking.slot_number.to_string(),
                    booking.start_time.timestamp_millis().to_string(),
                    booking.end_time.timestamp_millis().to_string(),
                    String::new(),
                ],
            )
            .await?;

        info!(
            booking_id = %booking.booking_id,
            area = %booking.location,
            slot = booking.slot_number,
            "booking recorded"
        );
        Ok(booking)
    }

    /// Strict mode only. Read-then-append is not atomic against a
    /// concurrent writer, so this narrows the window rather than closing
    /// it; the relaxed default makes no promise at all.
    async fn check_slot_conflict(&self, area: &Area, request: &BookingRequest) -> DomainResult<()> {
        let rows = self.store.read_rows(BOOKINGS_TABLE).await?;
        let existing = decode_bookings(&rows)?;
        let conflict = existing.iter().any(|b| {
            b.location == area.name
                && b.slot_number == request.slot_number
                && b.overlaps(request.start_time, request.end_time)
        });
        if conflict {
            return Err(DomainError::SlotConflict {
                area: area.name.clone(),
                slot: request.slot_number,
            });
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::InMemoryRecordStore;
    use chrono::TimeZone;

    fn registry() -> Arc<AreaRegistry> {
        Arc::new(AreaRegistry::new(vec![Area {
            id: "mg_road".into(),
            name: "MG Road".into(),
            total_slots: 150,
            lat: None,
            lng: None,
        }]))
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn request(slot: u32, start_ms: i64, end_ms: i64) -> BookingRequest {
        BookingRequest {
            area_id: "mg_road".into(),
            slot_number: slot,
            start_time: at(start_ms),
            end_time: at(end_ms),
        }
    }

    #[tokio::test]
    async fn creates_booking_with_generated_id() {
        let store = Arc::new(InMemoryRecordStore::new());
        let svc = BookingService::new(store.clone(), registry(), false);
        let booking = svc.create_booking(request(7, 1_000, 2_000)).await.unwrap();
        assert!(booking.booking_id.starts_with("SP"));
        assert_eq!(booking.location, "MG Road");

        // row landed in the store and decodes back
        let rows = store.read_rows(BOOKINGS_TABLE).await.unwrap();
        let decoded = decode_bookings(&rows).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].booking_id, booking.booking_id);
        assert_eq!(decoded[0].start_time, at(1_000));
    }

    #[tokio::test]
    async fn rejects_inverted_window_before_any_store_call() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_unavailable(true); // would fail if the store were touched
        let svc = BookingService::new(store, registry(), false);
        let err = svc.create_booking(request(7, 2_000, 1_000)).await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn rejects_unknown_area() {
        let svc = BookingService::new(Arc::new(InMemoryRecordStore::new()), registry(), false);
        let mut req = request(7, 1_000, 2_000);
        req.area_id = "nowhere".into();
        let err = svc.create_booking(req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn relaxed_mode_accepts_overlap() {
        let svc = BookingService::new(Arc::new(InMemoryRecordStore::new()), registry(), false);
        svc.create_booking(request(7, 1_000, 2_000)).await.unwrap();
        // same slot, same window: accepted in relaxed mode
        svc.create_booking(request(7, 1_000, 2_000)).await.unwrap();
    }

    #[tokio::test]
    async fn strict_mode_rejects_overlap_on_same_slot() {
        let svc = BookingService::new(Arc::new(InMemoryRecordStore::new()), registry(), true);
        svc.create_booking(request(7, 1_000, 2_000)).await.unwrap();

        let err = svc.create_booking(request(7, 1_500, 2_500)).await.unwrap_err();
        assert!(matches!(err, DomainError::SlotConflict { slot: 7, .. }));

        // different slot is fine
        svc.create_booking(request(8, 1_500, 2_500)).await.unwrap();
        // same slot, non-overlapping (touching) window is fine
        svc.create_booking(request(7, 2_000, 3_000)).await.unwrap();
    }
}
