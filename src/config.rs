//! Configuration module
//!
//! TOML application configuration, loaded from `$SMARTPARK_CONFIG` or
//! `~/.config/smartpark/config.toml`, falling back to built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Area, AreaRegistry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config file location: `~/.config/smartpark/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smartpark")
        .join("config.toml")
}

/// Full application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
    pub gate: GateConfig,
    pub booking: BookingConfig,
    /// Static parking areas, immutable for the process lifetime
    pub areas: Vec<AreaConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `smartpark=debug`
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Endpoint of the external ticket-validation service
    pub url: String,
    /// Per-request timeout; a timed-out validation never deposits
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Register used when a gate-control request names no gate
    pub default_gate_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Reject bookings overlapping an existing one for the same
    /// `(area, slot)`. Off by default: the relaxed behavior is the
    /// documented baseline.
    pub strict_slot_conflicts: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaConfig {
    pub id: String,
    pub name: String,
    pub total_slots: u32,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the immutable area registry from configuration.
    pub fn area_registry(&self) -> AreaRegistry {
        AreaRegistry::new(
            self.areas
                .iter()
                .map(|a| Area {
                    id: a.id.clone(),
                    name: a.name.clone(),
                    total_slots: a.total_slots,
                    lat: a.lat,
                    lng: a.lng,
                })
                .collect(),
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            validation: ValidationConfig::default(),
            gate: GateConfig::default(),
            booking: BookingConfig::default(),
            areas: vec![
                AreaConfig {
                    id: "kr_circle".into(),
                    name: "KR Circle".into(),
                    total_slots: 100,
                    lat: Some(12.9740),
                    lng: Some(77.5732),
                },
                AreaConfig {
                    id: "indiranagar".into(),
                    name: "Indiranagar".into(),
                    total_slots: 80,
                    lat: Some(12.9719),
                    lng: Some(77.6412),
                },
                AreaConfig {
                    id: "mg_road".into(),
                    name: "MG Road".into(),
                    total_slots: 150,
                    lat: Some(12.9756),
                    lng: Some(77.6060),
                },
                AreaConfig {
                    id: "koramangala".into(),
                    name: "Koramangala".into(),
                    total_slots: 60,
                    lat: Some(12.9345),
                    lng: Some(77.6180),
                },
            ],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8090/validate".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            default_gate_id: "GATE_MAIN".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            strict_slot_conflicts: false,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_four_areas() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.areas.len(), 4);
        assert_eq!(cfg.server.port, 3000);
        assert!(!cfg.booking.strict_slot_conflicts);
        let registry = cfg.area_registry();
        assert_eq!(registry.by_id("mg_road").unwrap().total_slots, 150);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [booking]
            strict_slot_conflicts = true

            [[areas]]
            id = "lot_a"
            name = "Lot A"
            total_slots = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0"); // default kept
        assert!(cfg.booking.strict_slot_conflicts);
        assert_eq!(cfg.areas.len(), 1);
        assert!(cfg.areas[0].lat.is_none());
    }

    #[test]
    fn address_joins_host_and_port() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.address(), "0.0.0.0:3000");
    }
}
