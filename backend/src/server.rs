use std::net::SocketAddr;

use aide::openapi::OpenApi;
use axum::{body::Body, middleware, Extension, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::middleware::{cors_layer, detect_locale, enforce_timeout, handle_panic, make_request_span};
use crate::routes;
use crate::service::SharedChatService;
use crate::types::Config;

/// Assembles the application router with its middleware stack
///
/// Requests pass, in order, through CORS, locale detection, request id,
/// panic recovery, request logging and the request timeout.
///
/// # Errors
///
/// Returns an error if the CORS policy cannot be built from the configuration
pub fn build_router(config: &Config, service: SharedChatService) -> anyhow::Result<Router> {
    let mut openapi = OpenApi::default();

    let layers = ServiceBuilder::new()
        .layer(cors_layer(config)?)
        .layer(middleware::from_fn(detect_locale))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span::<Body>)
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(middleware::from_fn_with_state(
            config.request_timeout,
            enforce_timeout,
        ));

    let router = routes::handler(config.environment)
        .finish_api(&mut openapi)
        .fallback(routes::fallback)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(Extension(openapi))
        .layer(Extension(config.environment))
        .layer(Extension(service))
        .layer(layers);

    Ok(router)
}

/// Starts the server with the given configuration and chat service
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(config: Config, service: SharedChatService) -> anyhow::Result<()> {
    let router = build_router(&config, service)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        environment = %config.environment,
        "🔄 Stockbot Backend started on http://{addr}"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
