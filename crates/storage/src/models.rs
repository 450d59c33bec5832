use serde::{Deserialize, Serialize};

/// A retrieval unit: one window of a source document's text.
///
/// Serialized field names match the metadata artifact
/// (`global_id`, `pdf_path`, `chunk_id`, `text`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position across the whole corpus; equals the vector index row.
    pub global_id: u64,
    #[serde(rename = "pdf_path")]
    pub source_locator: String,
    /// Position within its own source's chunk sequence.
    #[serde(rename = "chunk_id")]
    pub local_index: usize,
    pub text: String,
}

impl Chunk {
    /// File name of the source, or the full locator when it has none.
    pub fn source_name(&self) -> &str {
        std::path::Path::new(&self.source_locator)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.source_locator)
    }
}
