//! Exact nearest-neighbour index over fixed-dimension embeddings.
//!
//! Every search is a full scan using squared Euclidean distance, so results
//! are exact. Rows are stored contiguously in insertion order.

use crate::StorageError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Squared L2 distance to the query.
    pub distance: f32,
    /// Row in insertion order.
    pub position: usize,
}

/// Maps a squared distance into `(0, 1]`; strictly decreasing.
pub fn similarity(distance: f32) -> f32 {
    1.0 / (1.0 + distance.max(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dim: usize,
    data: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    index: FlatIndex,
}

impl FlatIndex {
    pub fn new(dim: usize) -> Result<Self, StorageError> {
        if dim == 0 {
            return Err(StorageError::EmptyVector);
        }
        Ok(Self {
            dim,
            data: Vec::new(),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends a batch of rows. The whole batch is rejected if any vector
    /// has the wrong dimension.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<(), StorageError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dim) {
            return Err(StorageError::DimensionMismatch {
                expected: self.dim,
                actual: bad.len(),
            });
        }
        self.data.reserve(vectors.len() * self.dim);
        for v in vectors {
            self.data.extend_from_slice(v);
        }
        Ok(())
    }

    /// Returns at most `min(k, len)` neighbours, nearest first. Equal
    /// distances keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, StorageError> {
        if query.len() != self.dim {
            return Err(StorageError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }
        let mut scored: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(position, row)| Neighbor {
                distance: squared_l2(query, row),
                position,
            })
            .collect();
        scored.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
            Ordering::Equal => a.position.cmp(&b.position),
            other => other,
        });
        scored.truncate(k);
        Ok(scored)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let file = IndexFile {
            version: FORMAT_VERSION,
            index: self.clone(),
        };
        let bytes = bincode::serialize(&file)?;
        crate::write_replacing(path, &bytes)
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::MissingArtifact(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
        let file: IndexFile = bincode::deserialize(&bytes)?;
        let corrupt = |reason: String| StorageError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };
        if file.version != FORMAT_VERSION {
            return Err(corrupt(format!("unsupported version {}", file.version)));
        }
        let index = file.index;
        if index.dim == 0 || index.data.len() % index.dim != 0 {
            return Err(corrupt(format!(
                "{} values do not divide into rows of {}",
                index.data.len(),
                index.dim
            )));
        }
        Ok(index)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
