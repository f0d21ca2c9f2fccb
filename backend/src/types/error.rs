//! Universal error handling for the API

use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::ApiResponse;
use crate::{llm::LlmError, service::ServiceError, stock::StockError};

/// Application error rendered as the response envelope with `data: null`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: Cow<'static, str>,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Generic 500 used when nothing more specific can be said
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }

    /// 404 for unknown routes and hidden endpoints
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "Resource not found")
    }

    /// 405 for known paths called with an unsupported method
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method_not_allowed",
            "Method not allowed",
        )
    }

    /// 504 for requests exceeding their deadline
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            "request_timeout",
            "The request took too long to complete",
        )
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code, used in logs
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable message placed in the envelope
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.code, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.code, self.message),
            _ => {}
        }

        let body = ApiResponse::new(Value::Null, self.message);
        (self.status, Json(body)).into_response()
    }
}

/// Convert chat service errors to application errors
impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(reason) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_input", reason)
            }
            ServiceError::MissingCompanyIdentifier => Self::new(
                StatusCode::BAD_REQUEST,
                "missing_company_identifier",
                "Either companyId or tadawulId must be provided",
            ),
            ServiceError::CompanyNotFound(id) => {
                tracing::debug!("Company not found: {id}");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "company_not_found",
                    format!("No listed company matches '{id}'"),
                )
            }
            ServiceError::Stock(err) => err.into(),
            ServiceError::Llm(err) => err.into(),
        }
    }
}

/// Convert stock provider errors to application errors
impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        tracing::error!("Stock provider error: {err}");
        match err {
            StockError::Timeout => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                "stock_provider_timeout",
                "The stock data provider did not respond in time",
            ),
            StockError::Http { .. } | StockError::Network(_) | StockError::Decode(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "stock_provider_error",
                "Stock data provider is temporarily unavailable",
            ),
        }
    }
}

/// Convert LLM errors to application errors
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        tracing::error!("LLM error: {err}");
        match err {
            LlmError::RateLimited => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "llm_rate_limited",
                "The assistant is busy, please try again shortly",
            ),
            LlmError::Timeout => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                "llm_timeout",
                "The assistant did not respond in time",
            ),
            LlmError::Http { .. }
            | LlmError::Network(_)
            | LlmError::Serialization(_)
            | LlmError::EmptyResponse => Self::new(
                StatusCode::BAD_GATEWAY,
                "llm_error",
                "The assistant is temporarily unavailable",
            ),
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiResponse<Value>;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiResponse<Value>>::operation_response(ctx, operation)
    }
}
