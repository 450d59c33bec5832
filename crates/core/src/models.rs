use crate::category::ResolvedCategory;
use serde::{Deserialize, Serialize};
use storage::Chunk;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalCandidate {
    pub chunk: Chunk,
    pub lexical_score: u32,
    /// `1 / (1 + squared distance)`, in `(0, 1]`.
    pub vector_similarity: f32,
}

/// A retrieved chunk as shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceChunk {
    pub source_locator: String,
    pub chunk_id: usize,
    pub text: String,
}

impl SourceChunk {
    /// Copies `chunk`, keeping at most `max_chars` characters of its text.
    pub fn from_chunk(chunk: &Chunk, max_chars: usize) -> Self {
        Self {
            source_locator: chunk.source_locator.clone(),
            chunk_id: chunk.local_index,
            text: chunk.text.chars().take(max_chars).collect(),
        }
    }
}

/// Which responder produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Responder {
    /// Retrieval plus generation.
    Rag,
    /// Rule-based helper used while the retrieval stack is unavailable.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<SourceChunk>,
    pub detected_category: String,
    pub category: ResolvedCategory,
    pub responder: Responder,
}
