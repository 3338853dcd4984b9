//! Booking write endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use tracing::error;
use validator::Validate;

use crate::api::dto::{CreateBookingRequest, CreateBookingResponse, ErrorBody};
use crate::application::{BookingRequest, BookingService};
use crate::domain::DomainError;

/// State for the booking write path
#[derive(Clone)]
pub struct BookingState {
    pub bookings: Arc<BookingService>,
}

/// Record a booking (post-payment write)
///
/// In the default relaxed mode overlapping bookings for the same slot are
/// accepted; with `booking.strict_slot_conflicts` enabled they are
/// rejected with 409.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking recorded", body = CreateBookingResponse),
        (status = 400, description = "Invalid fields or time window", body = ErrorBody),
        (status = 404, description = "Unknown area", body = ErrorBody),
        (status = 409, description = "Slot conflict (strict mode)", body = ErrorBody),
        (status = 500, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn create_booking(
    State(state): State<BookingState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), (StatusCode, Json<ErrorBody>)> {
    if let Err(e) = request.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))));
    }

    let instant = |millis: i64, field: &str| {
        DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(format!("{field} is out of range"))),
            )
        })
    };
    let start_time = instant(request.start_time, "startTime")?;
    let end_time = instant(request.end_time, "endTime")?;

    let result = state
        .bookings
        .create_booking(BookingRequest {
            area_id: request.area_id,
            slot_number: request.slot_number,
            start_time,
            end_time,
        })
        .await;

    match result {
        Ok(booking) => Ok((
            StatusCode::CREATED,
            Json(CreateBookingResponse {
                booking_id: booking.booking_id,
            }),
        )),
        Err(DomainError::MalformedRequest(msg)) => {
            Err((StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))))
        }
        Err(DomainError::NotFound { .. }) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Area not found")),
        )),
        Err(e @ DomainError::SlotConflict { .. }) => {
            Err((StatusCode::CONFLICT, Json(ErrorBody::new(e.to_string()))))
        }
        Err(e) => {
            error!(error = %e, "failed to record booking");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Could not record booking.")),
            ))
        }
    }
}
