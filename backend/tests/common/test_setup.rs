use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use stockbot_backend::{
    llm::{mock::MockLlmClient, LlmReply},
    server,
    service::{mock::MockChatService, ChatService, StockChatService},
    stock::mock::MockStockClient,
    types::{Config, Environment},
};
use tower::ServiceExt;

pub const FRONTEND_URL: &str = "http://localhost:3000";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Development configuration with defaults only
pub fn test_config() -> Config {
    Config::from_lookup(Environment::Development, |_| None).expect("default config")
}

/// Chat service over mock stock and LLM clients
pub fn stock_chat_service(llm: MockLlmClient, stock: MockStockClient) -> Arc<dyn ChatService> {
    Arc::new(StockChatService::new(
        &test_config(),
        Arc::new(llm),
        Arc::new(stock),
    ))
}

/// Chat service answering with sample market data
pub fn sample_service() -> Arc<dyn ChatService> {
    stock_chat_service(
        MockLlmClient::replying(LlmReply::text("Aramco is up 1.2% today.")),
        MockStockClient::with_sample_data(),
    )
}

/// Full router over a mocked chat service
pub struct TestSetup {
    pub router: Router,
    pub config: Config,
}

impl TestSetup {
    pub fn new(service: MockChatService) -> Self {
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn ChatService>) -> Self {
        Self::with_config(test_config(), service)
    }

    pub fn with_config(config: Config, service: Arc<dyn ChatService>) -> Self {
        setup_test_env();

        let router = server::build_router(&config, service).expect("router");
        Self { router, config }
    }

    pub async fn send_request(
        &self,
        request: Request<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        self.send_request(request).await
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;

        self.send_request(request).await
    }

    pub async fn send_preflight_request(
        &self,
        route: &str,
        origin: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("OPTIONS")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())?;

        self.send_request(request).await
    }

    pub async fn parse_response_body(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        use http_body_util::BodyExt;

        let body = response.into_body().collect().await?.to_bytes();
        let json = serde_json::from_slice(&body)?;
        Ok(json)
    }
}
