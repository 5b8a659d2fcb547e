//! HTTP surface: a single summarize endpoint plus a health check.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{ServerConfig, Settings};
use crate::semantic::{EmbeddingGenerator, FastEmbedGenerator, Summarizer};

pub use error::ApiError;

/// Route path of the summarize endpoint.
pub const SUMMARIZE_PATH: &str = "/extract-and-summarize-pdf";

/// State shared by every request. The summarizer and its model are read-only.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(summarizer: Summarizer) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SUMMARIZE_PATH, post(handlers::extract_and_summarize_pdf))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .with_state(state)
}

/// Load the embedding model, then serve until Ctrl+C.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let semantic = settings.semantic_search.clone();

    // Model download and ONNX session creation block
    let generator =
        tokio::task::spawn_blocking(move || FastEmbedGenerator::from_settings(&semantic)).await??;
    let generator: Arc<dyn EmbeddingGenerator> = Arc::new(generator);

    let summarizer = Summarizer::new(generator, &settings.semantic_search);
    crate::debug_event!("server", "summarizer ready", "{}", summarizer.model_name());
    let app = router(AppState::new(summarizer), &settings.server);

    let bind = settings.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    crate::log_event!("server", "listening", "http://{bind}{SUMMARIZE_PATH}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    crate::log_event!("server", "stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "server", "failed to listen for ctrl+c: {e}");
        std::future::pending::<()>().await;
    }
    crate::log_event!("server", "shutdown signal received");
}
