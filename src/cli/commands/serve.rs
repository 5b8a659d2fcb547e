//! Serve command - run the HTTP service.

use crate::config::Settings;

/// Run the serve command. `bind` overrides the configured address.
pub async fn run(mut config: Settings, bind: Option<String>) {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    tracing::debug!(
        target: "server",
        "model: {}, top_k: {}, upload limit: {} bytes",
        config.semantic_search.model,
        config.semantic_search.top_k,
        config.server.max_upload_bytes
    );

    if let Err(e) = crate::server::serve(config).await {
        eprintln!("HTTP server error: {e}");
        std::process::exit(1);
    }
}
