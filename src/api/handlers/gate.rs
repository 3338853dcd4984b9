//! Gate control endpoints: the server side and the hardware side
//!
//! `POST /gate-control` is called by the reservation client; it validates
//! the ticket and deposits an `OPEN` command. `GET /get-gate-command` is
//! the hardware's poll: a read with a side effect that consumes a pending
//! `OPEN`. Polling is the hardware's only input channel.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::api::dto::{GateCommandQuery, GateCommandResponse, GateControlRequest, GateMessage};
use crate::application::{GateCommandChannel, GateService};
use crate::domain::{DomainError, GateAction, GateCommand};

/// State for gate endpoints
#[derive(Clone)]
pub struct GateState {
    pub gate_service: Arc<GateService>,
    pub channel: Arc<GateCommandChannel>,
    /// Register used when the request names no gate
    pub default_gate_id: String,
}

const TICKET_NOT_VALID: &str = "This ticket is not valid (already fully used or expired).";
const INTERNAL_ERROR: &str = "An internal server error occurred.";

/// Request a gate action for a booking
///
/// Validates the ticket against the external validation service (which
/// decrements its remaining uses) and, only on success, deposits an
/// `OPEN` command for the gate hardware to consume.
#[utoipa::path(
    post,
    path = "/gate-control",
    tag = "Gate",
    request_body = GateControlRequest,
    responses(
        (status = 200, description = "Action authorized, command deposited", body = GateMessage),
        (status = 400, description = "Missing fields or invalid ticket", body = GateMessage),
        (status = 500, description = "Internal failure", body = GateMessage)
    )
)]
pub async fn gate_control(
    State(state): State<GateState>,
    Json(request): Json<GateControlRequest>,
) -> Result<Json<GateMessage>, (StatusCode, Json<GateMessage>)> {
    // Checked before any store or network call.
    let (action, booking_id) = match (
        request.action.as_deref().filter(|s| !s.is_empty()),
        request.booking_id.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(action), Some(booking_id)) => (action, booking_id),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(GateMessage::new("Missing booking ID or action.")),
            ));
        }
    };

    let Some(action) = GateAction::parse(action) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(GateMessage::new(
                "Invalid action: expected \"entry\" or \"exit\".",
            )),
        ));
    };

    let gate_id = request
        .gate_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.default_gate_id);

    match state
        .gate_service
        .request_gate_action(gate_id, action, booking_id)
        .await
    {
        Ok(message) => Ok(Json(GateMessage::new(message))),
        Err(DomainError::ValidationRejected(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(GateMessage::new(TICKET_NOT_VALID)),
        )),
        Err(e) => {
            error!(gate_id, booking_id, error = %e, "gate-control failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GateMessage::new(INTERNAL_ERROR)),
            ))
        }
    }
}

/// Hardware poll: read and consume the pending gate command
///
/// Consuming read: observing `OPEN` resets the register to `NONE` in the
/// same call, so each deposited command opens the gate at most once.
#[utoipa::path(
    get,
    path = "/get-gate-command",
    tag = "Gate",
    params(GateCommandQuery),
    responses(
        (status = 200, description = "Pending command, now consumed", body = GateCommandResponse),
        (status = 400, description = "Missing gateId", body = GateCommandResponse),
        (status = 500, description = "Record store unavailable", body = GateCommandResponse)
    )
)]
pub async fn get_gate_command(
    State(state): State<GateState>,
    Query(query): Query<GateCommandQuery>,
) -> (StatusCode, Json<GateCommandResponse>) {
    let none = || {
        Json(GateCommandResponse {
            command: GateCommand::None.as_str().to_string(),
        })
    };

    let Some(gate_id) = query.gate_id.as_deref().filter(|s| !s.is_empty()) else {
        return (StatusCode::BAD_REQUEST, none());
    };

    match state.channel.poll_and_consume(gate_id).await {
        Ok(polled) => (
            StatusCode::OK,
            Json(GateCommandResponse {
                command: polled.command.as_str().to_string(),
            }),
        ),
        Err(e) => {
            error!(gate_id, error = %e, "gate poll failed");
            (StatusCode::INTERNAL_SERVER_ERROR, none())
        }
    }
}
