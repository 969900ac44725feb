//! Parkinson's Disease Prediction Dashboard
//!
//! Web frontend for the detection pipeline in `parkinson-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 PARKINSON'S DASHBOARD                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │ Dashboard │  │  JSON     │  │  Detection Pipeline     │ │
//! │  │ (HTML)    │  │  API      │  │  predict + TreeSHAP     │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │                ┌─────────────┐                             │
//! │                │ Arc<Model>  │  loaded once at startup     │
//! │                └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod view;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use parkinson_core::LoadedModel;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::LogFormat;
pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "parkinson_dashboard=debug,parkinson_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(config.log_format);

    tracing::info!("Parkinson's Disease Prediction Dashboard starting...");
    tracing::info!("Environment: {}", config.environment);

    // Model load failure is fatal
    let model = parkinson_core::load_model(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path))?;

    let metadata = model.metadata();
    tracing::info!(
        model_type = %metadata.model_type,
        trees = metadata.tree_count,
        nodes = metadata.node_count,
        layout_hash = %format!("{:#010x}", metadata.layout.hash),
        "Model ready"
    );

    // Build application state
    let state = AppState {
        model: Arc::new(model),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
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
    pub model: Arc<LoadedModel>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Interactive dashboard (HTML)
    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/detect", post(handlers::dashboard::detect_form));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::api::predict))
        .route("/api/v1/features", get(handlers::api::features))
        .route("/api/v1/model", get(handlers::api::model_info));

    let router = Router::new()
        .merge(dashboard_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Cross-origin API access only outside production
    let router = if state.config.is_production() {
        router
    } else {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    };

    router.with_state(state)
}
