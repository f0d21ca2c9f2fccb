mod docs;
mod health;
/// Version 1 API
pub mod v1;

use aide::axum::{routing::get, ApiRouter};
use axum::response::IntoResponse;

use crate::types::{AppError, Environment};

/// Creates the router with all handler routes
///
/// API docs are only mounted where the environment allows them.
pub fn handler(environment: Environment) -> ApiRouter {
    let router = ApiRouter::new()
        .api_route("/api/v1/health", get(health::handler))
        .merge(v1::handler());

    if environment.show_api_docs() {
        router.merge(docs::handler())
    } else {
        router
    }
}

/// Envelope for paths no route matches
#[allow(clippy::unused_async)]
pub async fn fallback() -> impl IntoResponse {
    AppError::not_found()
}

/// Envelope for known paths called with another method
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> impl IntoResponse {
    AppError::method_not_allowed()
}
