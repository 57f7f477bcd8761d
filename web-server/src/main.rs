//! HeartCheck Web Server
//!
//! Serves the heart disease prediction form and a small JSON API over the
//! same prediction pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HEARTCHECK WEB                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  HTML     │  │  JSON     │  │  Status / Reference     │ │
//! │  │  Form     │  │  API      │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │            ┌─────────────────────┐                         │
//! │            │ PredictionPipeline  │  scaler → classifier    │
//! │            └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use heartcheck_core::{load_pipeline, PredictionPipeline};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};

const DEFAULT_LOG_FILTER: &str = "heartcheck_web=debug,heartcheck_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_logging(config.log_format);

    tracing::info!("HeartCheck Web starting ({})...", config.environment);
    tracing::info!(
        "Artifacts: model={} scaler={}",
        config.model_path.display(),
        config.scaler_path.display()
    );

    // Artifacts are a hard startup dependency
    let pipeline = load_pipeline(&config.artifact_paths()).map_err(|e| {
        tracing::error!("Failed to load {} artifact: {}", e.kind(), e);
        e
    }).context("failed to load prediction artifacts")?;

    tracing::info!("Prediction pipeline ready: {:?}", pipeline);

    // Build application state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Initialize tracing; `log` records from the core crate are bridged in
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub config: Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Page routes
    let page_routes = Router::new()
        .route("/", get(handlers::page::show).post(handlers::page::submit))
        .route("/health", get(handlers::health::check));

    // JSON API
    let api_routes = Router::new()
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/reference", get(handlers::reference::reference))
        .route("/api/v1/form", get(handlers::reference::form))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        );

    // Combine all routes
    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
