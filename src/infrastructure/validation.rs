//! HTTP client for the external ticket-validation service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Authorization, GateAction, TicketValidator};

/// Wire request: the service exposes a single RPC-style action that
/// atomically checks and decrements a booking's remaining uses.
#[derive(Debug, Serialize)]
struct ValidationRequest<'a> {
    action: &'static str,
    #[serde(rename = "bookingId")]
    booking_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Ticket validator backed by the remote validation service.
///
/// Performs exactly one POST per authorization. Any non-success response
/// body, undecodable body, or transport failure (timeout, connect error)
/// maps to `Rejected` - never retried here.
pub struct HttpTicketValidator {
    client: Client,
    url: String,
}

impl HttpTicketValidator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TicketValidator for HttpTicketValidator {
    async fn authorize(&self, booking_id: &str, action: GateAction) -> Authorization {
        let request = ValidationRequest {
            action: "validate_and_decrement_use",
            booking_id,
        };

        let response = match self.client.post(&self.url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    booking_id,
                    action = action.as_str(),
                    error = %e,
                    "ticket-validation transport failure"
                );
                return Authorization::Rejected {
                    reason: "validation service unreachable".into(),
                };
            }
        };

        let body: ValidationResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    booking_id,
                    action = action.as_str(),
                    error = %e,
                    "ticket-validation returned an undecodable body"
                );
                return Authorization::Rejected {
                    reason: "unexpected validation response".into(),
                };
            }
        };

        if body.status == "success" {
            Authorization::Authorized
        } else {
            let reason = body.message.unwrap_or_else(|| "ticket not valid".into());
            warn!(
                booking_id,
                action = action.as_str(),
                reason = %reason,
                "ticket validation rejected"
            );
            Authorization::Rejected { reason }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
