use thiserror::Error;

/// Errors raised by the stock data provider client
#[derive(Debug, Error)]
pub enum StockError {
    /// The provider answered with a non-success status
    #[error("stock provider returned status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The provider did not answer in time
    #[error("stock provider request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("stock provider unreachable: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("failed to decode stock provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StockError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
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

impl From<reqwest_middleware::Error> for StockError {
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
    fn test_http_error_display() {
        let err = StockError::Http {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            StockError::Timeout.to_string(),
            "stock provider request timed out"
        );
    }
}
