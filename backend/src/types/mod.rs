mod config;
mod environment;
pub mod error;
mod extractors;
mod response;

pub use config::{listen_port, Config, ConfigError, LlmConfig, StockApiConfig, DEFAULT_PORT};
pub use environment::Environment;
pub use error::AppError;
pub use extractors::{ValidatedJson, ValidatedQuery};
pub use response::ApiResponse;
