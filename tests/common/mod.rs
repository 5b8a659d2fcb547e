//! Shared fixtures: PDF documents built with lopdf and deterministic
//! embedding generators.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdf_summarizer::semantic::{EmbeddingGenerator, SemanticSearchError};

/// Build a PDF where each entry of `pages` is one page and each string one
/// line of Helvetica text. An empty slice yields a page with no text.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 720 - (i as i64) * 40;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize pdf");
    buffer
}

/// Embeds each sentence by its first letter: sentences that start with the
/// same letter get identical vectors.
pub struct LetterGenerator;

impl EmbeddingGenerator for LetterGenerator {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticSearchError> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.1; 26];
                if let Some(c) = text.chars().next().filter(char::is_ascii_alphabetic) {
                    vector[(c.to_ascii_lowercase() as u8 - b'a') as usize] = 1.0;
                }
                vector
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        26
    }

    fn model_name(&self) -> &str {
        "letters"
    }
}

/// Always fails to embed.
pub struct FailingGenerator;

impl EmbeddingGenerator for FailingGenerator {
    fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticSearchError> {
        Err(SemanticSearchError::EmbeddingError(
            "inference session unavailable".to_string(),
        ))
    }

    fn dimension(&self) -> usize {
        26
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Panics inside inference, the way a tokenizer or ONNX session failure would.
pub struct PanickingGenerator;

impl EmbeddingGenerator for PanickingGenerator {
    fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticSearchError> {
        panic!("inference session crashed");
    }

    fn dimension(&self) -> usize {
        26
    }

    fn model_name(&self) -> &str {
        "panicking"
    }
}
