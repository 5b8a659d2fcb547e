//! Extraction followed by summarization, shared by the HTTP handler and the CLI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{self, ExtractionError};
use crate::semantic::{Summarizer, Summary};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("No extractable text found in the PDF.")]
    NoExtractableText,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub text: String,
    pub summary: Summary,
    pub page_count: usize,
    pub sentence_count: usize,
}

/// Wire shape returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub text: String,
    pub summary: String,
}

impl From<ProcessedDocument> for SummaryResponse {
    fn from(doc: ProcessedDocument) -> Self {
        Self {
            text: doc.text,
            summary: doc.summary.into_text(),
        }
    }
}

/// Extract a PDF's text and summarize its lines.
///
/// Blocking: runs the PDF parser and the embedding model on the calling thread.
pub fn process_pdf(
    bytes: &[u8],
    summarizer: &Summarizer,
) -> Result<ProcessedDocument, ProcessError> {
    let extracted = extract::extract_text(bytes)?;
    if extracted.is_blank() {
        return Err(ProcessError::NoExtractableText);
    }

    let sentences = extracted.sentences();
    let summary = summarizer.summarize(&sentences);
    if summary.is_degraded() {
        tracing::warn!(
            target: "pipeline",
            "returning degraded summary for {} sentences",
            sentences.len()
        );
    }

    Ok(ProcessedDocument {
        page_count: extracted.page_count(),
        sentence_count: sentences.len(),
        summary,
        text: extracted.into_string(),
    })
}
