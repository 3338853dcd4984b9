//! Gate control DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Gate-action request from the reservation client.
///
/// Fields are optional at the wire level so that missing ones can be
/// answered with the protocol's own 400 message instead of a
/// deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateControlRequest {
    /// `entry` or `exit`
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub booking_id: Option<String>,
    /// Target gate register; defaults to the configured gate when absent
    #[serde(default)]
    pub gate_id: Option<String>,
}

/// User-facing message for gate-control outcomes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GateMessage {
    pub message: String,
}

impl GateMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query for the hardware poll endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct GateCommandQuery {
    /// Gate register to poll (and consume from)
    #[serde(default, rename = "gateId")]
    pub gate_id: Option<String>,
}

/// What the hardware observed: `OPEN` or `NONE`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GateCommandResponse {
    pub command: String,
}
