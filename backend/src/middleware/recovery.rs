use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::types::AppError;

/// Turns a handler panic into a 500 envelope
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = detail, "Recovered from handler panic");
    AppError::internal().into_response()
}
