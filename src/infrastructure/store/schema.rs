//! Typed row schema for the `Bookings` table
//!
//! The store hands back untyped string cells; this module resolves the
//! header row into column indices once and decodes data rows into
//! [`Booking`] values, failing fast on missing columns instead of
//! producing partially-populated records.

use chrono::{DateTime, Utc};

use super::BOOKINGS_TABLE;
use crate::domain::{Booking, DomainError, DomainResult};

const COL_BOOKING_ID: &str = "BookingID";
const COL_LOCATION: &str = "Location";
const COL_SLOT_NUMBER: &str = "SlotNumber";
const COL_START_TIME: &str = "BookingStartTime";
const COL_END_TIME: &str = "BookingEndTime";

/// Column positions of the booking fields, resolved from a header row.
#[derive(Debug, Clone, Copy)]
pub struct BookingSchema {
    booking_id: usize,
    location: usize,
    slot_number: usize,
    start_time: usize,
    end_time: usize,
}

fn mismatch(detail: impl Into<String>) -> DomainError {
    DomainError::SchemaMismatch {
        table: BOOKINGS_TABLE,
        detail: detail.into(),
    }
}

impl BookingSchema {
    /// Resolve expected columns from the header row.
    pub fn from_header(header: &[String]) -> DomainResult<Self> {
        let col = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| mismatch(format!("missing column {name}")))
        };
        Ok(Self {
            booking_id: col(COL_BOOKING_ID)?,
            location: col(COL_LOCATION)?,
            slot_number: col(COL_SLOT_NUMBER)?,
            start_time: col(COL_START_TIME)?,
            end_time: col(COL_END_TIME)?,
        })
    }

    /// Decode one data row into a [`Booking`].
    pub fn decode_row(&self, row: &[String]) -> DomainResult<Booking> {
        let cell = |idx: usize, name: &str| {
            row.get(idx)
                .ok_or_else(|| mismatch(format!("row too short, missing {name}")))
        };
        let slot_cell = cell(self.slot_number, COL_SLOT_NUMBER)?;
        let slot_number = slot_cell
            .parse::<u32>()
            .map_err(|_| mismatch(format!("invalid slot number {slot_cell:?}")))?;
        Ok(Booking {
            booking_id: cell(self.booking_id, COL_BOOKING_ID)?.clone(),
            location: cell(self.location, COL_LOCATION)?.clone(),
            slot_number,
            start_time: parse_instant(cell(self.start_time, COL_START_TIME)?)?,
            end_time: parse_instant(cell(self.end_time, COL_END_TIME)?)?,
        })
    }
}

/// Decode a full table read (header first) into bookings.
pub fn decode_bookings(rows: &[Vec<String>]) -> DomainResult<Vec<Booking>> {
    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };
    let schema = BookingSchema::from_header(header)?;
    rows[1..].iter().map(|r| schema.decode_row(r)).collect()
}

/// Parse a timestamp cell.
///
/// The store has held both epoch milliseconds and RFC 3339 strings over
/// its lifetime; both must decode.
fn parse_instant(cell: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(millis) = cell.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| mismatch(format!("timestamp out of range: {millis}")));
    }
    DateTime::parse_from_rfc3339(cell)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| mismatch(format!("invalid timestamp {cell:?}")))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&[
            "BookingID",
            "Location",
            "SlotNumber",
            "BookingStartTime",
            "BookingEndTime",
            "PaymentID",
        ])
    }

    #[test]
    fn decodes_epoch_millis_row() {
        let schema = BookingSchema::from_header(&header()).unwrap();
        let b = schema
            .decode_row(&row(&[
                "SPAB12CD",
                "MG Road",
                "12",
                "1700000000000",
                "1700003600000",
                "pay_123",
            ]))
            .unwrap();
        assert_eq!(b.booking_id, "SPAB12CD");
        assert_eq!(b.location, "MG Road");
        assert_eq!(b.slot_number, 12);
        assert_eq!(b.start_time.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(b.end_time.timestamp_millis(), 1_700_003_600_000);
    }

    #[test]
    fn decodes_rfc3339_row() {
        let schema = BookingSchema::from_header(&header()).unwrap();
        let b = schema
            .decode_row(&row(&[
                "SPAB12CD",
                "MG Road",
                "3",
                "2026-08-23T10:00:00Z",
                "2026-08-23T11:00:00+00:00",
                "",
            ]))
            .unwrap();
        assert!(b.start_time < b.end_time);
    }

    #[test]
    fn missing_header_column_fails_fast() {
        let bad = row(&["BookingID", "Location", "BookingStartTime", "BookingEndTime"]);
        let err = BookingSchema::from_header(&bad).unwrap_err();
        assert!(matches!(err, DomainError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("SlotNumber"));
    }

    #[test]
    fn short_row_fails_fast() {
        let schema = BookingSchema::from_header(&header()).unwrap();
        let err = schema
            .decode_row(&row(&["SPAB12CD", "MG Road", "3"]))
            .unwrap_err();
        assert!(matches!(err, DomainError::SchemaMismatch { .. }));
    }

    #[test]
    fn extra_columns_are_tolerated_in_any_order() {
        let reordered = row(&[
            "PaymentID",
            "BookingEndTime",
            "BookingID",
            "SlotNumber",
            "Location",
            "BookingStartTime",
        ]);
        let schema = BookingSchema::from_header(&reordered).unwrap();
        let b = schema
            .decode_row(&row(&[
                "pay_1",
                "2000",
                "SP00000001",
                "5",
                "KR Circle",
                "1000",
            ]))
            .unwrap();
        assert_eq!(b.slot_number, 5);
        assert_eq!(b.location, "KR Circle");
    }

    #[test]
    fn decode_bookings_handles_empty_and_header_only() {
        assert!(decode_bookings(&[]).unwrap().is_empty());
        assert!(decode_bookings(&[header()]).unwrap().is_empty());
    }
}
