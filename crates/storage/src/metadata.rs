//! Ordered chunk records, parallel to the vector index rows.

use crate::{Chunk, StorageError};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataStore {
    records: Vec<Chunk>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: Chunk) {
        self.records.push(chunk);
    }

    pub fn get(&self, position: usize) -> Option<&Chunk> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Chunk] {
        &self.records
    }

    /// Writes the records as one JSON array; array order is row order.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&self.records)?;
        crate::write_replacing(path, &bytes)
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::MissingArtifact(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
        let records: Vec<Chunk> = serde_json::from_slice(&bytes)?;
        Ok(Self { records })
    }
}

impl FromIterator<Chunk> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
