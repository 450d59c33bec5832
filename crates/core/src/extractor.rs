//! Best-effort text extraction from corpus documents.

use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Turns one document into plain text. Implementations must tolerate
/// partially unreadable documents and return whatever text they can.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> anyhow::Result<String>;
}

/// Reads PDFs page by page and plain-text files whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => pdf_text(path),
            "txt" | "md" => fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            other => anyhow::bail!("unsupported document type {:?}: {}", other, path.display()),
        }
    }
}

/// Page texts joined with newlines. A page that fails to extract is skipped.
fn pdf_text(path: &Path) -> anyhow::Result<String> {
    let doc = lopdf::Document::load(path)
        .with_context(|| format!("opening pdf {}", path.display()))?;
    let mut parts = Vec::new();
    for page in doc.get_pages().keys() {
        match doc.extract_text(&[*page]) {
            Ok(text) => parts.push(text),
            Err(e) => {
                warn!("Skipping page {} of {}: {}", page, path.display(), e);
            }
        }
    }
    debug!("Extracted {} page(s) from {}", parts.len(), path.display());
    Ok(parts.join("\n"))
}
