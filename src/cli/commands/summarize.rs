//! Summarize command - run extraction and summarization on a local file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::config::Settings;
use crate::pipeline::{self, SummaryResponse};
use crate::semantic::{FastEmbedGenerator, Summarizer};

/// Run the summarize command, printing the response JSON to stdout.
pub fn run(mut config: Settings, file: &Path, top_k: Option<usize>) {
    if let Some(top_k) = top_k {
        config.semantic_search.top_k = top_k;
    }

    let result = summarize_file(&config, file)
        .and_then(|response| serde_json::to_string_pretty(&response).map_err(Into::into));

    match result {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn summarize_file(config: &Settings, file: &Path) -> anyhow::Result<SummaryResponse> {
    let bytes = std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;

    let generator = FastEmbedGenerator::from_settings(&config.semantic_search)?;
    let summarizer = Summarizer::new(Arc::new(generator), &config.semantic_search);

    let processed = pipeline::process_pdf(&bytes, &summarizer)
        .with_context(|| format!("cannot summarize {}", file.display()))?;

    if processed.summary.is_degraded() {
        eprintln!("Warning: summarization degraded, see log for details");
    }

    Ok(processed.into())
}
