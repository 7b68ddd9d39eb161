//! Document Loader — turns an uploaded or on-disk résumé into plain text.
//!
//! Degrades to *some* text wherever it can: bad UTF-8 is re-read as Latin-1, and a PDF page
//! that fails to extract is skipped rather than failing the document.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use lopdf::Document;
use tracing::{debug, warn};

use crate::errors::AnalysisError;

/// Input to the pipeline. Consumed once by `load_document`.
#[derive(Debug, Clone)]
pub enum RawDocument {
    Path(PathBuf),
    Bytes { bytes: Bytes, filename: String },
}

impl RawDocument {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        RawDocument::Path(path.into())
    }

    pub fn from_bytes(bytes: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        RawDocument::Bytes {
            bytes: bytes.into(),
            filename: filename.into(),
        }
    }
}

/// Decoded document text. Always valid UTF-8; never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainText(String);

impl PlainText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlainText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// Anything without a plain-text extension is treated as PDF.
    fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("txt") | Some("text") => DocumentKind::Text,
            _ => DocumentKind::Pdf,
        }
    }
}

/// Loads a `RawDocument` into `PlainText`.
///
/// Fails with `FileNotFound` for a missing path and `DocumentUnreadable` when the file cannot be
/// read or the PDF cannot be parsed at all. A PDF whose pages all fail yields empty text.
pub fn load_document(document: RawDocument) -> Result<PlainText, AnalysisError> {
    let (bytes, filename) = match document {
        RawDocument::Path(path) => {
            if !path.exists() {
                return Err(AnalysisError::FileNotFound(path));
            }
            let bytes = std::fs::read(&path).map_err(|e| {
                AnalysisError::DocumentUnreadable(format!("{}: {e}", path.display()))
            })?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (Bytes::from(bytes), filename)
        }
        RawDocument::Bytes { bytes, filename } => (bytes, filename),
    };

    let text = match DocumentKind::from_filename(&filename) {
        DocumentKind::Text => decode_text(&bytes),
        DocumentKind::Pdf => extract_pdf_text(&bytes, &filename)?,
    };
    debug!("Loaded {} characters from '{filename}'", text.chars().count());
    Ok(PlainText(text))
}

/// UTF-8 first, Latin-1 otherwise. Latin-1 maps every byte, so this cannot fail.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("Text document is not valid UTF-8 ({e}); decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

fn extract_pdf_text(bytes: &[u8], filename: &str) -> Result<String, AnalysisError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| AnalysisError::DocumentUnreadable(format!("{filename}: {e}")))?;

    // get_pages is keyed by 1-based page number, already in order.
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut text = String::new();
    for page_number in page_numbers {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => warn!("Skipping page {page_number} of '{filename}': {e}"),
        }
    }
    Ok(text)
}
