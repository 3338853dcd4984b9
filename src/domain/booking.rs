//! Booking domain entity

use chrono::{DateTime, Utc};

use super::{DomainError, DomainResult};

/// A time-windowed occupancy claim on one slot within an area.
///
/// Bookings are immutable once written and never deleted; expiry is
/// computed from `end_time`, not enforced by deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Opaque unique identifier (`SP` + 8 uppercase hex chars)
    pub booking_id: String,
    /// Area name this booking belongs to (loose FK to `Area::name`)
    pub location: String,
    /// Slot within the area; not validated against capacity at write time
    pub slot_number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Booking {
    /// Check the `start_time < end_time` invariant.
    pub fn validate(&self) -> DomainResult<()> {
        if self.start_time >= self.end_time {
            return Err(DomainError::MalformedRequest(format!(
                "booking {} has start_time >= end_time",
                self.booking_id
            )));
        }
        Ok(())
    }

    /// Whether this booking occupies its slot at `as_of`.
    ///
    /// The interval is half-open: `[start_time, end_time)`.
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.start_time <= as_of && as_of < self.end_time
    }

    /// Whether this booking's window overlaps `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }
}

/// Generate a fresh booking id: `SP` followed by 8 uppercase hex chars.
pub fn new_booking_id() -> String {
    let bytes: [u8; 4] = rand::random();
    format!("SP{}", hex::encode(bytes).to_uppercase())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(start_ms: i64, end_ms: i64) -> Booking {
        Booking {
            booking_id: "SPAB12CD".into(),
            location: "MG Road".into(),
            slot_number: 7,
            start_time: Utc.timestamp_millis_opt(start_ms).unwrap(),
            end_time: Utc.timestamp_millis_opt(end_ms).unwrap(),
        }
    }

    #[test]
    fn active_interval_is_half_open() {
        let b = booking(1_000, 2_000);
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();

        assert!(!b.is_active_at(at(999)));
        assert!(b.is_active_at(at(1_000))); // inclusive start
        assert!(b.is_active_at(at(1_999)));
        assert!(!b.is_active_at(at(2_000))); // exclusive end
    }

    #[test]
    fn overlap_is_half_open() {
        let b = booking(1_000, 2_000);
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();

        assert!(b.overlaps(at(1_500), at(2_500)));
        assert!(b.overlaps(at(500), at(1_001)));
        // touching windows do not overlap
        assert!(!b.overlaps(at(2_000), at(3_000)));
        assert!(!b.overlaps(at(0), at(1_000)));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let b = booking(2_000, 1_000);
        assert!(b.validate().is_err());
        let b = booking(1_000, 1_000);
        assert!(b.validate().is_err());
    }

    #[test]
    fn booking_id_format() {
        let id = new_booking_id();
        assert_eq!(id.len(), 10);
        assert!(id.starts_with("SP"));
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, id.to_uppercase());
    }
}
