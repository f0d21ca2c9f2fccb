use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

mod chat;
mod dashboard;

/// Version 1 API routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/api/v1/chat", post(chat::handler))
        .api_route("/api/v1/dashboard", get(dashboard::list))
        .api_route("/api/v1/dashboard/chart", get(dashboard::chart))
}
