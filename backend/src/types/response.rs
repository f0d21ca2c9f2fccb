//! Uniform response envelope

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response
///
/// Success responses carry the payload in `data`; errors carry `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,
    /// Human-readable outcome
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload with a message
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}
