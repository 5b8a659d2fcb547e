//! Sentence embeddings, similarity search and extractive summarization.
//!
//! The embedding model is loaded once at startup and passed explicitly to
//! [`Summarizer`], which keeps summarization testable without a real model.

mod embedding;
mod search;
mod summarizer;

pub use embedding::{
    EmbeddingGenerator, FastEmbedGenerator, model_to_string, parse_embedding_model,
};
pub use search::{SearchHit, cosine_similarity, semantic_search};
pub use summarizer::{DEGRADED_SUMMARY, RankedSentence, Summarizer, Summary};

// Re-export key types
pub use fastembed::EmbeddingModel;

/// Error type for embedding and ranking operations
#[derive(Debug, thiserror::Error)]
pub enum SemanticSearchError {
    #[error("Failed to initialize embedding model: {0}")]
    ModelInitError(String),

    #[error("Unknown embedding model: {0}")]
    UnknownModel(String),

    #[error("Failed to generate embedding: {0}")]
    EmbeddingError(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No embeddings available for search")]
    NoEmbeddings,

    #[error("Search result refers to missing sentence {0}")]
    IndexOutOfRange(usize),

    #[error("Embedding model panicked: {0}")]
    Panicked(String),
}
