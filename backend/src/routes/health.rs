use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

use crate::i18n::{Locale, Message};
use crate::types::ApiResponse;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// Server time, RFC 3339
    timestamp: String,
}

/// Health check endpoint
///
/// Returns the current status and version information of the service.
/// This endpoint can be used for monitoring and deployment verification.
#[allow(clippy::unused_async)]
pub async fn handler(locale: Locale) -> impl IntoApiResponse {
    Json(ApiResponse::new(
        HealthResponse {
            status: "ok".to_string(),
            semver: env!("CARGO_PKG_VERSION").to_string(),
            rev: option_env!("GIT_REV").map(ToString::to_string),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        locale.text(Message::Healthy),
    ))
}
