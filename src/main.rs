//! SmartPark coordination service binary.
//!
//! Reads configuration from a TOML file (`$SMARTPARK_CONFIG` or
//! `~/.config/smartpark/config.toml`) and serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use smartpark::application::{AvailabilityEngine, BookingService, GateCommandChannel, GateService};
use smartpark::infrastructure::{HttpTicketValidator, InMemoryRecordStore};
use smartpark::{create_api_router, default_config_path, ApiState, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SMARTPARK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting SmartPark coordination service...");

    // ── Prometheus metrics recorder (before any metrics calls) ─
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // ── Record store ───────────────────────────────────────────
    // The in-memory adapter backs development deployments; a durable
    // spreadsheet-backed adapter plugs in behind the same trait.
    let store: Arc<dyn smartpark::RecordStore> = Arc::new(InMemoryRecordStore::new());
    info!("Record store: in-memory");

    // ── Areas ──────────────────────────────────────────────────
    let areas = Arc::new(config.area_registry());
    info!("Configured {} parking areas", areas.len());

    // ── Services ───────────────────────────────────────────────
    let engine = Arc::new(AvailabilityEngine::new(store.clone()));
    let channel = Arc::new(GateCommandChannel::new(store.clone()));
    let validator = Arc::new(HttpTicketValidator::new(
        config.validation.url.clone(),
        Duration::from_secs(config.validation.timeout_secs),
    ));
    let gate_service = Arc::new(GateService::new(validator, channel.clone()));
    let bookings = Arc::new(BookingService::new(
        store.clone(),
        areas.clone(),
        config.booking.strict_slot_conflicts,
    ));
    info!(
        "Ticket validation: {} (timeout {}s)",
        config.validation.url, config.validation.timeout_secs
    );
    if config.booking.strict_slot_conflicts {
        info!("Strict slot-conflict mode enabled");
    }

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(ApiState {
        engine,
        areas,
        gate_service,
        channel,
        bookings,
        default_gate_id: config.gate.default_gate_id.clone(),
        metrics_handle: Some(metrics_handle),
    });

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on http://{}", addr);
    info!("Swagger UI at http://{}/docs", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    } else {
        info!("Shutdown signal received");
    }
}
