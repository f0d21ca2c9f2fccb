//! Process-wide settings, loaded once at startup

use std::env;
use std::time::Duration;

use thiserror::Error;

use super::Environment;

/// Port used when `PORT` is unset or empty
pub const DEFAULT_PORT: u16 = 8080;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_STOCK_API_BASE_URL: &str = "http://localhost:9000";
const DEFAULT_LLM_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_STOCK_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 40;
const DEFAULT_CHAT_HISTORY_LIMIT: usize = 20;

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable required in deployed stages is missing
    #[error("{0} must be set in {1}")]
    Missing(&'static str, Environment),

    /// A variable is present but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value found
        value: String,
    },
}

/// Stock data provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockApiConfig {
    /// Provider base URL, without trailing slash
    pub base_url: String,
    /// Optional API key sent as `X-API-Key`
    pub api_key: Option<String>,
    /// Outbound request timeout
    pub timeout: Duration,
}

/// LLM endpoint settings (OpenAI-compatible)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Outbound request timeout
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deployment stage
    pub environment: Environment,
    /// Origin allowed by CORS, without trailing slash
    pub frontend_url: String,
    /// Listen port
    pub port: u16,
    /// Deadline applied to every inbound request
    pub request_timeout: Duration,
    /// Number of most recent chat messages forwarded to the LLM
    pub chat_history_limit: usize,
    /// Stock provider settings
    pub stock: StockApiConfig,
    /// LLM settings
    pub llm: LlmConfig,
}

impl Config {
    /// Reads the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a mandatory variable is missing or a value is malformed
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        Self::from_lookup(environment, |name| env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a mandatory variable is missing or a value is malformed
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str, dev_default: &str| match var(name) {
            Some(value) => Ok(value),
            None if environment.is_deployed() => Err(ConfigError::Missing(name, environment)),
            None => Ok(dev_default.to_string()),
        };

        let llm_api_key = var("LLM_API_KEY");
        if llm_api_key.is_none() && environment.is_deployed() {
            return Err(ConfigError::Missing("LLM_API_KEY", environment));
        }

        Ok(Self {
            environment,
            frontend_url: trim_url(required("FRONTEND_URL", DEFAULT_FRONTEND_URL)?),
            port: listen_port(var("PORT"))?,
            request_timeout: seconds(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            chat_history_limit: parse_or(
                "CHAT_HISTORY_LIMIT",
                var("CHAT_HISTORY_LIMIT"),
                DEFAULT_CHAT_HISTORY_LIMIT,
            )?,
            stock: StockApiConfig {
                base_url: trim_url(required("STOCK_API_BASE_URL", DEFAULT_STOCK_API_BASE_URL)?),
                api_key: var("STOCK_API_KEY"),
                timeout: seconds(
                    "STOCK_API_TIMEOUT_SECS",
                    var("STOCK_API_TIMEOUT_SECS"),
                    DEFAULT_STOCK_TIMEOUT_SECS,
                )?,
            },
            llm: LlmConfig {
                base_url: trim_url(
                    var("LLM_API_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_API_BASE_URL.to_string()),
                ),
                api_key: llm_api_key,
                model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout: seconds(
                    "LLM_API_TIMEOUT_SECS",
                    var("LLM_API_TIMEOUT_SECS"),
                    DEFAULT_LLM_TIMEOUT_SECS,
                )?,
            },
        })
    }
}

/// Resolves the listen port, falling back to [`DEFAULT_PORT`]
///
/// # Errors
///
/// Returns an error if the value is not a valid port number
pub fn listen_port(value: Option<String>) -> Result<u16, ConfigError> {
    parse_or(
        "PORT",
        value.filter(|value| !value.trim().is_empty()),
        DEFAULT_PORT,
    )
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw })
    })
}

fn seconds(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    match parse_or(name, value, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
