//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{bookings, gate, health, locations, slots};
use crate::application::{AvailabilityEngine, BookingService, GateCommandChannel, GateService};
use crate::domain::AreaRegistry;

/// Unified state for all routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<AvailabilityEngine>,
    pub areas: Arc<AreaRegistry>,
    pub gate_service: Arc<GateService>,
    pub channel: Arc<GateCommandChannel>,
    pub bookings: Arc<BookingService>,
    pub default_gate_id: String,
    /// Prometheus render handle; `None` disables the /metrics route
    /// (tests do not install the global recorder)
    pub metrics_handle: Option<PrometheusHandle>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for locations::AvailabilityState {
    fn from_ref(s: &ApiState) -> Self {
        locations::AvailabilityState {
            engine: Arc::clone(&s.engine),
            areas: Arc::clone(&s.areas),
        }
    }
}

impl FromRef<ApiState> for gate::GateState {
    fn from_ref(s: &ApiState) -> Self {
        gate::GateState {
            gate_service: Arc::clone(&s.gate_service),
            channel: Arc::clone(&s.channel),
            default_gate_id: s.default_gate_id.clone(),
        }
    }
}

impl FromRef<ApiState> for bookings::BookingState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        locations::list_locations,
        slots::get_area_slots,
        gate::gate_control,
        gate::get_gate_command,
        bookings::create_booking,
    ),
    components(
        schemas(
            ErrorBody,
            LocationSummary,
            SlotBookingDto,
            AreaSlotsResponse,
            GateControlRequest,
            GateMessage,
            GateCommandResponse,
            CreateBookingRequest,
            CreateBookingResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check."),
        (name = "Availability", description = "Live slot availability per parking area. Counts bookings whose time window contains the current instant; responses are marked non-cacheable because availability changes continuously."),
        (name = "Gate", description = "Gate-command handoff. The server deposits an OPEN command after ticket validation; gate hardware polls `/get-gate-command` and consumes it (read-then-clear). Each register holds at most one pending command."),
        (name = "Bookings", description = "Post-payment booking write path. Relaxed by default (no slot-conflict check); strict mode rejects overlapping bookings for the same slot."),
    ),
    info(
        title = "SmartPark Coordination API",
        version = "0.1.0",
        description = "Booking-availability engine and gate-command handoff for physical parking slots.

Three asynchronous actors: the reservation client, the external ticket-validation service, and poll-only gate hardware. The gate register is a depth-one channel: a second deposit overwrites an unconsumed command.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/locations", get(locations::list_locations))
        .route("/slots/{area_id}", get(slots::get_area_slots))
        .route("/gate-control", post(gate::gate_control))
        .route("/get-gate-command", get(gate::get_gate_command))
        .route("/bookings", post(bookings::create_booking));

    if let Some(handle) = state.metrics_handle.clone() {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
