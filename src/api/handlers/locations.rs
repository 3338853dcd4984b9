//! Locations endpoint: every area with live availability

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use chrono::Utc;
use tracing::error;

use crate::api::dto::{ErrorBody, LocationSummary};
use crate::application::AvailabilityEngine;
use crate::domain::AreaRegistry;

/// State for availability endpoints
#[derive(Clone)]
pub struct AvailabilityState {
    pub engine: Arc<AvailabilityEngine>,
    pub areas: Arc<AreaRegistry>,
}

/// Availability changes continuously; forbid client and proxy caching.
const NO_STORE_HEADERS: [(HeaderName, &str); 3] = [
    (
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, proxy-revalidate",
    ),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

/// All parking areas with current availability
///
/// Counts bookings whose window contains the current instant;
/// future bookings do not reserve capacity.
#[utoipa::path(
    get,
    path = "/locations",
    tag = "Availability",
    responses(
        (status = 200, description = "Areas with live availability", body = [LocationSummary]),
        (status = 500, description = "Record store unavailable", body = ErrorBody)
    )
)]
pub async fn list_locations(
    State(state): State<AvailabilityState>,
) -> Result<([(HeaderName, &'static str); 3], Json<Vec<LocationSummary>>), (StatusCode, Json<ErrorBody>)>
{
    let now = Utc::now();
    match state.engine.compute_all(state.areas.iter(), now).await {
        Ok(all) => {
            let summaries = all
                .into_iter()
                .map(|(area, availability)| LocationSummary::from_parts(area, availability))
                .collect();
            Ok((NO_STORE_HEADERS, Json(summaries)))
        }
        Err(e) => {
            error!(error = %e, "failed to compute location availability");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Could not retrieve location data.")),
            ))
        }
    }
}
