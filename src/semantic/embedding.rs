//! Embedding generation.
//!
//! The summarizer talks to an [`EmbeddingGenerator`] rather than to fastembed
//! directly. The process loads one [`FastEmbedGenerator`] at startup and
//! shares it read-only across requests.

use std::sync::{Mutex, PoisonError};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::SemanticSearchError;
use crate::config::SemanticSearchConfig;

/// Batched text-to-vector encoder.
pub trait EmbeddingGenerator: Send + Sync {
    /// Encode every text, returning one vector per input in input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticSearchError>;

    /// Length of every vector this generator produces.
    fn dimension(&self) -> usize;

    /// Human readable model identifier, used in logs.
    fn model_name(&self) -> &str;
}

/// fastembed-backed generator.
pub struct FastEmbedGenerator {
    /// The embedding model (wrapped in Mutex for interior mutability)
    model: Mutex<TextEmbedding>,
    dimension: usize,
    model_name: String,
}

impl FastEmbedGenerator {
    /// Load the default model (AllMiniLML6V2, 384 dimensions).
    pub fn new() -> Result<Self, SemanticSearchError> {
        Self::from_settings(&SemanticSearchConfig::default())
    }

    /// Load the model named in settings. Blocks while the model downloads.
    pub fn from_settings(config: &SemanticSearchConfig) -> Result<Self, SemanticSearchError> {
        let model = parse_embedding_model(&config.model)?;
        let model_name = model_to_string(&model);

        let mut options =
            InitOptions::new(model).with_show_download_progress(config.show_download_progress);
        if let Some(cache_dir) = &config.cache_dir {
            options = options.with_cache_dir(cache_dir.clone());
        }

        crate::log_event!("model", "loading", "{model_name}");

        let mut text_model = TextEmbedding::try_new(options)
            .map_err(|e| SemanticSearchError::ModelInitError(e.to_string()))?;

        // Get dimensions by generating a probe embedding
        let probe = text_model
            .embed(vec!["dimension probe"], None)
            .map_err(|e| SemanticSearchError::EmbeddingError(e.to_string()))?;
        let dimension = probe
            .into_iter()
            .next()
            .map(|v| v.len())
            .ok_or_else(|| SemanticSearchError::EmbeddingError("empty probe output".to_string()))?;

        crate::log_event!("model", "loaded", "{model_name} ({dimension} dimensions)");

        Ok(Self {
            model: Mutex::new(text_model),
            dimension,
            model_name,
        })
    }
}

impl EmbeddingGenerator for FastEmbedGenerator {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticSearchError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = {
            // Still usable after a panic in an earlier request
            let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
            model
                .embed(texts.to_vec(), None)
                .map_err(|e| SemanticSearchError::EmbeddingError(e.to_string()))?
        };

        if embeddings.len() != texts.len() {
            return Err(SemanticSearchError::EmbeddingError(format!(
                "model returned {} vectors for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }

        if let Some(bad) = embeddings.iter().find(|v| v.len() != self.dimension) {
            return Err(SemanticSearchError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Resolve a configured model name.
///
/// Accepts fastembed variant names (`AllMiniLML6V2`) and the Hugging Face
/// style names the sentence-transformers ecosystem uses (`all-MiniLM-L6-v2`).
pub fn parse_embedding_model(name: &str) -> Result<EmbeddingModel, SemanticSearchError> {
    let key: String = name
        .rsplit('/')
        .next()
        .unwrap_or(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match key.as_str() {
        "allminilml6v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "allminilml12v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "paraphrasemlminilml12v2" | "paraphrasemultilingualminilml12v2" => {
            Ok(EmbeddingModel::ParaphraseMLMiniLML12V2)
        }
        "bgesmallenv15" => Ok(EmbeddingModel::BGESmallENV15),
        "bgebaseenv15" => Ok(EmbeddingModel::BGEBaseENV15),
        "multilinguale5small" => Ok(EmbeddingModel::MultilingualE5Small),
        _ => Err(SemanticSearchError::UnknownModel(name.to_string())),
    }
}

/// Canonical name for a supported model.
pub fn model_to_string(model: &EmbeddingModel) -> String {
    match model {
        EmbeddingModel::AllMiniLML6V2 => "AllMiniLML6V2",
        EmbeddingModel::AllMiniLML12V2 => "AllMiniLML12V2",
        EmbeddingModel::ParaphraseMLMiniLML12V2 => "ParaphraseMLMiniLML12V2",
        EmbeddingModel::BGESmallENV15 => "BGESmallENV15",
        EmbeddingModel::BGEBaseENV15 => "BGEBaseENV15",
        EmbeddingModel::MultilingualE5Small => "MultilingualE5Small",
        _ => "custom",
    }
    .to_string()
}
