//! Custom extractors for request validation
//!
//! Both extractors reject with [`AppError`] so malformed input still produces
//! the response envelope instead of axum's plain-text rejections.

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::types::error::AppError;

/// Custom JSON extractor that validates the payload
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First extract JSON
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_content_type",
                    "Missing Content-Type: application/json header",
                ),
                JsonRejection::JsonDataError(err) => {
                    tracing::debug!("JSON data error: {err}");
                    AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_json",
                        "Request body does not match the expected format",
                    )
                }
                _ => AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_json",
                    "Invalid JSON payload",
                ),
            })?;

        // Then validate
        payload.validate().map_err(validation_error)?;

        Ok(Self(payload))
    }
}

/// Custom query-string extractor that validates the parameters
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err: QueryRejection| {
                tracing::debug!("Query rejection: {err}");
                AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_query",
                    "Invalid query parameters",
                )
            })?;

        params.validate().map_err(validation_error)?;

        Ok(Self(params))
    }
}

/// Names the first offending field in the error message
fn validation_error(errors: ValidationErrors) -> AppError {
    let field = errors
        .errors()
        .keys()
        .next()
        .map_or_else(|| "request".to_string(), ToString::to_string);
    tracing::debug!("Validation failed: {errors}");

    AppError::new(
        StatusCode::BAD_REQUEST,
        "validation_error",
        format!("Invalid value for field '{field}'"),
    )
}

impl<T> OperationInput for ValidatedJson<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut aide::generate::GenContext, operation: &mut aide::openapi::Operation) {
        // Delegate to Json<T>'s implementation since ValidatedJson has the same structure
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        // Document validation error responses
        AppError::inferred_responses(ctx, operation)
    }
}

impl<T> OperationInput for ValidatedQuery<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut aide::generate::GenContext, operation: &mut aide::openapi::Operation) {
        Query::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}
