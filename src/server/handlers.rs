//! Route handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};

use super::AppState;
use super::error::ApiError;
use crate::pipeline::{self, SummaryResponse};

/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

pub async fn health_check() -> &'static str {
    "OK"
}

/// `POST /extract-and-summarize-pdf`
pub async fn extract_and_summarize_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    // A body that is not multipart has no file field either
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::NoFile);
    };

    let bytes = read_file_field(&mut multipart)
        .await?
        .ok_or(ApiError::NoFile)?;

    let started = Instant::now();
    let size = bytes.len();
    let summarizer = state.summarizer.clone();

    let processed =
        tokio::task::spawn_blocking(move || pipeline::process_pdf(&bytes, &summarizer))
            .await
            .map_err(ApiError::internal)??;

    crate::log_event!(
        "server",
        "summarized",
        "{size} bytes, {} pages, {} sentences, degraded={}, {}ms",
        processed.page_count,
        processed.sentence_count,
        processed.summary.is_degraded(),
        started.elapsed().as_millis()
    );

    Ok(Json(processed.into()))
}

/// Drain the multipart stream until the `file` upload is found.
///
/// Only parts carrying a filename count as uploads; a plain form value named
/// `file` is skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(ApiError::internal)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            crate::debug_event!("server", "skipped", "`{FILE_FIELD}` part without filename");
            continue;
        };

        crate::debug_event!("server", "upload", "{file_name}");
        let bytes = field.bytes().await.map_err(ApiError::internal)?;
        return Ok(Some(bytes.to_vec()));
    }
    Ok(None)
}
