//! PDF text extraction.
//!
//! Pages are extracted with `pdf-extract` and normalised to non-blank,
//! trimmed lines. The parser can panic on malformed fonts, so every call is
//! wrapped in `catch_unwind` and surfaced as an [`ExtractionError`].

use thiserror::Error;

/// Errors from PDF text extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to parse PDF: {reason}")]
    Parse { reason: String },

    #[error("PDF parser panicked, the document is likely malformed")]
    Panicked,
}

/// Text extracted from a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    page_count: usize,
}

impl ExtractedText {
    /// Build from already-normalised page texts. Empty pages are skipped.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut page_count = 0;
        for page in pages {
            page_count += 1;
            let page = page.as_ref();
            if page.is_empty() {
                continue;
            }
            text.push_str(page);
            text.push('\n');
        }
        Self { text, page_count }
    }

    /// Full text: each non-empty page followed by a newline.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of pages in the source document, including empty ones.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// True when no page produced anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Trimmed, non-empty lines in document order.
    pub fn sentences(&self) -> Vec<String> {
        self.text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Extract the normalised text of each page.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let raw_pages = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| {
        tracing::error!(target: "extract", "pdf parser panicked on {} byte document", bytes.len());
        ExtractionError::Panicked
    })?
    .map_err(|e| ExtractionError::Parse {
        reason: e.to_string(),
    })?;

    Ok(raw_pages
        .iter()
        .map(String::as_str)
        .map(normalize_page)
        .collect())
}

/// Extract the whole document's text.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let pages = extract_pages(bytes)?;
    let extracted = ExtractedText::from_pages(&pages);

    crate::debug_event!(
        "extract",
        "done",
        "{} pages, {} chars",
        extracted.page_count(),
        extracted.as_str().len()
    );

    Ok(extracted)
}

/// Trim every line and drop blank ones; the layout engine pads pages with
/// empty lines that carry no text.
fn normalize_page(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
