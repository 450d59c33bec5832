//! Storage layer: the flat vector index, the chunk metadata store, and the
//! paired on-disk artifacts they are persisted as.
//!
//! Row `i` of the index always describes metadata entry `i`.

pub mod index;
pub mod metadata;
pub mod models;

mod error;
mod knowledge;

pub use error::StorageError;
pub use index::{similarity, FlatIndex, Neighbor};
pub use knowledge::KnowledgeBase;
pub use metadata::MetadataStore;
pub use models::Chunk;

use std::fs;
use std::path::Path;

/// Writes `bytes` next to `path` and renames over it so readers never see a
/// half-written artifact.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, bytes).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}
