//! Tests against the real AllMiniLML6V2 model. They download the model on
//! first run, so they are ignored by default:
//! `cargo test --test embedding_model_test -- --ignored`

use std::sync::Arc;

use anyhow::Result;
use pdf_summarizer::semantic::{EmbeddingGenerator, FastEmbedGenerator, Summarizer, Summary};

fn sentences(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
#[ignore = "downloads the embedding model"]
fn test_embeddings_are_normalized() -> Result<()> {
    let generator = FastEmbedGenerator::new()?;

    let embeddings = generator.embed_batch(&["The quarterly report shows growth."])?;

    assert_eq!(embeddings.len(), 1);
    assert_eq!(embeddings[0].len(), 384);
    let magnitude: f32 = embeddings[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((magnitude - 1.0).abs() < 0.01, "Embedding magnitude: {magnitude}");

    Ok(())
}

#[test]
#[ignore = "downloads the embedding model"]
fn test_real_model_summary_has_three_sentences() -> Result<()> {
    let summarizer = Summarizer::with_defaults(Arc::new(FastEmbedGenerator::new()?));
    let input = sentences(&[
        "Revenue grew twelve percent in the third quarter.",
        "The weather in the capital was unusually warm.",
        "Sales increases were driven by new enterprise contracts.",
        "Operating margin improved alongside revenue growth.",
        "The cafeteria introduced a new lunch menu.",
    ]);

    let summary = summarizer.summarize(&input);

    let Summary::Ranked { picks, text } = &summary else {
        panic!("expected ranked summary, got {summary:?}");
    };
    assert_eq!(picks.len(), 3);
    // The query sentence is always its own nearest neighbour
    assert_eq!(picks[0].index, 0);
    for pick in picks {
        assert!(text.contains(&input[pick.index]));
    }

    Ok(())
}
