//! Slot-level view of one area

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::locations::AvailabilityState;
use crate::api::dto::{AreaSlotsResponse, ErrorBody, SlotBookingDto};

/// Bookings and physical sensor overlay for one area
///
/// Lists every booking that has not yet ended, plus slots whose physical
/// sensor reports busy. The overlay is advisory and is not merged into
/// availability.
#[utoipa::path(
    get,
    path = "/slots/{area_id}",
    tag = "Availability",
    params(
        ("area_id" = String, Path, description = "Area id, e.g. `mg_road`")
    ),
    responses(
        (status = 200, description = "Area slot details", body = AreaSlotsResponse),
        (status = 404, description = "Unknown area", body = ErrorBody),
        (status = 500, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn get_area_slots(
    State(state): State<AvailabilityState>,
    Path(area_id): Path<String>,
) -> Result<Json<AreaSlotsResponse>, (StatusCode, Json<ErrorBody>)> {
    let Some(area) = state.areas.by_id(&area_id) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Area not found")),
        ));
    };

    let bookings = state.engine.list_bookings_for_area(area).await;
    let physically_occupied = state.engine.physically_occupied().await;

    match (bookings, physically_occupied) {
        (Ok(bookings), Ok(physically_occupied)) => Ok(Json(AreaSlotsResponse {
            name: area.name.clone(),
            total_slots: area.total_slots,
            lat: area.lat,
            lng: area.lng,
            bookings: bookings.iter().map(SlotBookingDto::from).collect(),
            physically_occupied,
        })),
        (Err(e), _) | (_, Err(e)) => {
            error!(area_id = %area_id, error = %e, "failed to load slot data");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Could not retrieve slot data.")),
            ))
        }
    }
}
