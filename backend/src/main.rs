use std::sync::Arc;

use stockbot_backend::{
    llm::OpenAiClient,
    server,
    service::StockChatService,
    stock::HttpStockClient,
    types::{Config, Environment},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // RUST_LOG wins over the stage default
    let filter = EnvFilter::builder()
        .with_default_directive(environment.tracing_level().into())
        .from_env_lossy();

    // JSON in staging/production for the log pipeline, human-readable locally
    if environment.json_logs() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env(environment)?;

    let stock_client = Arc::new(HttpStockClient::new(&config.stock)?);
    let llm_client = Arc::new(OpenAiClient::new(&config.llm, stock_client.clone())?);
    let service = Arc::new(StockChatService::new(&config, llm_client, stock_client));

    server::start(config, service).await
}
