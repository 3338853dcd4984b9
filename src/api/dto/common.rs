//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body used by the read endpoints, e.g. `{"error": "Area not found"}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
