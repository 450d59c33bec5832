use crate::{FlatIndex, MetadataStore, StorageError};
use std::path::Path;
use tracing::info;

/// The vector index and its metadata, loaded or built as one matched pair.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    index: FlatIndex,
    metadata: MetadataStore,
}

impl KnowledgeBase {
    pub fn new(index: FlatIndex, metadata: MetadataStore) -> Result<Self, StorageError> {
        if index.len() != metadata.len() {
            return Err(StorageError::Misaligned {
                index: index.len(),
                metadata: metadata.len(),
            });
        }
        Ok(Self { index, metadata })
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Both artifacts must exist; a missing one is reported by path.
    pub fn load(index_path: &Path, metadata_path: &Path) -> Result<Self, StorageError> {
        for path in [index_path, metadata_path] {
            if !path.exists() {
                return Err(StorageError::MissingArtifact(path.to_path_buf()));
            }
        }
        let index = FlatIndex::load(index_path)?;
        let metadata = MetadataStore::load(metadata_path)?;
        let kb = Self::new(index, metadata)?;
        info!(
            "Loaded knowledge base: {} chunks, dimension {}",
            kb.len(),
            kb.index.dim()
        );
        Ok(kb)
    }

    /// Replaces both artifacts. The index is written first.
    pub fn save(&self, index_path: &Path, metadata_path: &Path) -> Result<(), StorageError> {
        info!("Saving vector index to {}", index_path.display());
        self.index.save(index_path)?;
        info!("Saving metadata to {}", metadata_path.display());
        self.metadata.save(metadata_path)?;
        Ok(())
    }
}
