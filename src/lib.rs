pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod semantic;
pub mod server;

pub use config::Settings;
pub use extract::{ExtractedText, ExtractionError};
pub use pipeline::{ProcessError, ProcessedDocument, SummaryResponse, process_pdf};
pub use semantic::{EmbeddingGenerator, FastEmbedGenerator, Summarizer, Summary};
