//! Sliding-window chunking over characters.
//!
//! Windows are `chunk_size` characters long and consecutive windows share
//! exactly `overlap` characters. Only the last window may be shorter.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    InvalidOverlap { chunk_size: usize, overlap: usize },
}

/// Half-open character range `[start, end)` of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkError::InvalidOverlap {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Raw windows over a text of `len` characters, before trimming.
    pub fn windows(&self, len: usize) -> Vec<Window> {
        let mut out = Vec::new();
        let mut start = 0;
        while start < len {
            let end = start.saturating_add(self.chunk_size).min(len);
            out.push(Window { start, end });
            if end == len {
                break;
            }
            start = end - self.overlap;
        }
        out
    }

    /// Trimmed, non-empty window texts in document order.
    pub fn split(&self, text: &str) -> Vec<String> {
        // Byte offset of every char boundary, plus the end of the text.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;
        self.windows(len)
            .into_iter()
            .filter_map(|w| {
                let piece = text[bounds[w.start]..bounds[w.end]].trim();
                (!piece.is_empty()).then(|| piece.to_string())
            })
            .collect()
    }
}
