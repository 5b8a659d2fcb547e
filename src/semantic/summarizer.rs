//! Extractive summarization by self-similarity search.
//!
//! The first sentence's embedding is searched against every sentence in the
//! document, and the `top_k` closest sentences become the summary, in the
//! order the search reports them. Short inputs are passed through untouched.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::search::{SearchHit, semantic_search};
use super::{EmbeddingGenerator, SemanticSearchError};
use crate::config::SemanticSearchConfig;

/// Text shown in place of a summary when ranking failed.
pub const DEGRADED_SUMMARY: &str = "Error during summarization.";

/// A sentence picked for the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSentence {
    /// Position in the input sequence
    pub index: usize,
    pub score: f32,
    pub sentence: String,
}

/// Outcome of [`Summarizer::summarize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Input too short to rank; sentences joined in original order
    Passthrough(String),
    /// Sentences selected by similarity ranking
    Ranked {
        text: String,
        picks: Vec<RankedSentence>,
    },
    /// Embedding or ranking failed
    Degraded { reason: String },
}

impl Summary {
    /// Text to hand back to clients.
    pub fn text(&self) -> &str {
        match self {
            Summary::Passthrough(text) | Summary::Ranked { text, .. } => text,
            Summary::Degraded { .. } => DEGRADED_SUMMARY,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Summary::Degraded { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            Summary::Passthrough(text) | Summary::Ranked { text, .. } => text,
            Summary::Degraded { .. } => DEGRADED_SUMMARY.to_string(),
        }
    }
}

/// Picks representative sentences using a shared embedding model.
pub struct Summarizer {
    generator: Arc<dyn EmbeddingGenerator>,
    top_k: usize,
    min_sentences: usize,
}

impl Summarizer {
    /// Thresholds below 1 are raised to 1.
    pub fn new(generator: Arc<dyn EmbeddingGenerator>, config: &SemanticSearchConfig) -> Self {
        Self {
            generator,
            top_k: config.top_k.max(1),
            min_sentences: config.min_sentences.max(1),
        }
    }

    pub fn with_defaults(generator: Arc<dyn EmbeddingGenerator>) -> Self {
        Self::new(generator, &SemanticSearchConfig::default())
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Summarize a sequence of non-empty sentences. Never fails; ranking
    /// errors and panics from the model are logged and reported as
    /// [`Summary::Degraded`].
    pub fn summarize(&self, sentences: &[String]) -> Summary {
        if sentences.len() < self.min_sentences {
            return Summary::Passthrough(sentences.join(" "));
        }

        let ranked = panic::catch_unwind(AssertUnwindSafe(|| self.rank(sentences)))
            .unwrap_or_else(|payload| Err(SemanticSearchError::Panicked(panic_message(payload))));

        match ranked {
            Ok(picks) => {
                let text = picks
                    .iter()
                    .map(|pick| pick.sentence.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                Summary::Ranked { text, picks }
            }
            Err(e) => {
                tracing::warn!(target: "summarizer", "summarization degraded: {e}");
                Summary::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn rank(&self, sentences: &[String]) -> Result<Vec<RankedSentence>, SemanticSearchError> {
        let texts: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let embeddings = self.generator.embed_batch(&texts)?;

        if embeddings.len() != sentences.len() {
            return Err(SemanticSearchError::EmbeddingError(format!(
                "expected {} embeddings, got {}",
                sentences.len(),
                embeddings.len()
            )));
        }

        // Only the first result group is used, so only the first sentence is queried
        let query = embeddings.first().ok_or(SemanticSearchError::NoEmbeddings)?;
        let groups = semantic_search(std::slice::from_ref(query), &embeddings, self.top_k)?;
        let first_group: Vec<SearchHit> = groups.into_iter().next().unwrap_or_default();

        crate::debug_event!(
            "summarizer",
            "ranked",
            "{} sentences, picked {:?}",
            sentences.len(),
            first_group.iter().map(|h| h.corpus_id).collect::<Vec<_>>()
        );

        first_group
            .into_iter()
            .map(|hit| {
                sentences
                    .get(hit.corpus_id)
                    .map(|sentence| RankedSentence {
                        index: hit.corpus_id,
                        score: hit.score,
                        sentence: sentence.clone(),
                    })
                    .ok_or(SemanticSearchError::IndexOutOfRange(hit.corpus_id))
            })
            .collect()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
