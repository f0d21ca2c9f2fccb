use thiserror::Error;

/// Errors raised by the LLM client
#[derive(Debug, Error)]
pub enum LlmError {
    /// The endpoint answered with a non-success status
    #[error("LLM endpoint returned status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The endpoint throttled the request (HTTP 429)
    #[error("LLM rate limit exceeded")]
    RateLimited,

    /// The endpoint did not answer in time
    #[error("LLM request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("LLM endpoint unreachable: {0}")]
    Network(String),

    /// JSON encoding or decoding failed
    #[error("LLM serialization error: {0}")]
    Serialization(String),

    /// The completion carried no text
    #[error("LLM returned an empty answer")]
    EmptyResponse,
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for LlmError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => Self::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error() {
        let err = LlmError::Http {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let llm_err: LlmError = json_err.into();
        assert!(matches!(llm_err, LlmError::Serialization(_)));
    }
}
