use thiserror::Error;

use crate::{llm::LlmError, stock::StockError};

/// Errors returned by the chat service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request is well-formed JSON but semantically unusable
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A chart was requested without `companyId` or `tadawulId`
    #[error("a company identifier is required")]
    MissingCompanyIdentifier,

    /// No listed company matches the identifier
    #[error("company not found: {0}")]
    CompanyNotFound(String),

    /// Stock provider failure
    #[error(transparent)]
    Stock(#[from] StockError),

    /// LLM failure
    #[error(transparent)]
    Llm(#[from] LlmError),
}
