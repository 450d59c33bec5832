//! Offline index build: discover → extract → chunk → number → embed → persist.

use crate::chunker::Chunker;
use crate::config::AppConfig;
use crate::embeddings::embed_texts;
use crate::extractor::{DocumentExtractor, TextExtractor};
use anyhow::Context;
use providers::{EmbeddingProvider, ProviderRegistry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storage::{Chunk, FlatIndex, KnowledgeBase, MetadataStore};
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub chunker: Chunker,
    pub batch_size: usize,
    pub workers: usize,
}

impl IngestOptions {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let chunker = Chunker::new(config.chunking.chunk_size, config.chunking.overlap)
            .context("invalid chunking configuration")?;
        anyhow::ensure!(
            config.chunking.batch_size > 0,
            "invalid chunking configuration: batch_size must be greater than zero"
        );
        Ok(Self {
            chunker,
            batch_size: config.chunking.batch_size,
            workers: config.chunking.workers.max(1),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestSummary {
    pub sources: usize,
    pub skipped_sources: usize,
    pub chunks: usize,
    pub dimension: Option<usize>,
    /// False when nothing was persisted (empty corpus or no text).
    pub written: bool,
}

/// Chunk texts of one source, before global numbering.
#[derive(Debug, Clone)]
struct DocumentChunks {
    locator: String,
    texts: Vec<String>,
}

/// Files under `dir` with one of `extensions`, sorted by path. A missing
/// directory yields no sources.
pub fn discover_sources(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|want| want.eq_ignore_ascii_case(e)))
                .unwrap_or(false)
        })
        .collect();
    sources.sort();
    sources
}

/// Runs the whole build described by `config` and replaces both artifacts.
pub async fn build_index(
    config: &AppConfig,
    registry: &ProviderRegistry,
) -> anyhow::Result<IngestSummary> {
    let embedder = registry
        .embedding(None)
        .context("embedding provider unavailable")?;
    build_index_with(config, Arc::new(DocumentExtractor), embedder.as_ref()).await
}

pub async fn build_index_with(
    config: &AppConfig,
    extractor: Arc<dyn TextExtractor>,
    embedder: &dyn EmbeddingProvider,
) -> anyhow::Result<IngestSummary> {
    let opts = IngestOptions::from_config(config)?;
    let corpus_dir = PathBuf::from(&config.corpus.dir);
    let sources = discover_sources(&corpus_dir, &config.corpus.extensions);
    if sources.is_empty() {
        warn!("No documents found in {}; nothing to index.", corpus_dir.display());
        return Ok(IngestSummary::default());
    }

    let (kb, mut summary) = ingest(&sources, extractor, embedder, opts).await?;
    let Some(kb) = kb else {
        warn!("No chunks embedded, index is empty.");
        return Ok(summary);
    };

    kb.save(&config.index.index_path(), &config.index.metadata_path())
        .context("persisting index artifacts")?;
    summary.written = true;
    info!("Index build complete: {} chunks.", summary.chunks);
    Ok(summary)
}

/// Builds the index pair for `sources` in memory. Returns `None` for the
/// knowledge base when no source produced any chunk.
pub async fn ingest(
    sources: &[PathBuf],
    extractor: Arc<dyn TextExtractor>,
    embedder: &dyn EmbeddingProvider,
    opts: IngestOptions,
) -> anyhow::Result<(Option<KnowledgeBase>, IngestSummary)> {
    let mut summary = IngestSummary {
        sources: sources.len(),
        ..Default::default()
    };

    let docs = chunk_sources(sources, extractor, opts).await?;
    summary.skipped_sources = sources.len() - docs.len();
    let numbered = number_chunks(docs);

    let mut index: Option<FlatIndex> = None;
    let mut metadata = MetadataStore::new();
    for doc in &numbered {
        for batch in doc.chunks(opts.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = embed_texts(embedder, &texts)
                .await
                .with_context(|| format!("embedding chunks of {}", batch[0].source_locator))?;

            if index.is_none() {
                let dim = vectors.first().map(Vec::len).unwrap_or(0);
                info!("Initialising flat index with dimension {}", dim);
                index = Some(FlatIndex::new(dim)?);
            }
            if let Some(idx) = index.as_mut() {
                idx.add(&vectors).with_context(|| {
                    format!("adding vectors for {}", batch[0].source_locator)
                })?;
            }
            for chunk in batch {
                metadata.push(chunk.clone());
            }
        }
        info!("  >> total chunks so far: {}", metadata.len());
    }

    let Some(index) = index else {
        return Ok((None, summary));
    };
    summary.chunks = metadata.len();
    summary.dimension = Some(index.dim());
    let kb = KnowledgeBase::new(index, metadata)?;
    Ok((Some(kb), summary))
}

/// Extracts and chunks every source, `opts.workers` at a time. Results come
/// back in locator order; sources that failed or had no text are dropped.
async fn chunk_sources(
    sources: &[PathBuf],
    extractor: Arc<dyn TextExtractor>,
    opts: IngestOptions,
) -> anyhow::Result<Vec<DocumentChunks>> {
    let semaphore = Arc::new(Semaphore::new(opts.workers));
    let mut handles = Vec::with_capacity(sources.len());
    for path in sources {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = Arc::clone(&extractor);
        let path = path.clone();
        let chunker = opts.chunker;
        handles.push(task::spawn_blocking(move || {
            let _permit = permit;
            chunk_document(&path, &chunker, extractor.as_ref())
        }));
    }

    let mut docs = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Some(doc) = handle.await? {
            docs.push(doc);
        }
    }
    docs.sort_by(|a, b| a.locator.cmp(&b.locator));
    Ok(docs)
}

fn chunk_document(
    path: &Path,
    chunker: &Chunker,
    extractor: &dyn TextExtractor,
) -> Option<DocumentChunks> {
    info!("Reading document: {}", path.display());
    let text = match extractor.extract(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Skipping {}: {:#}", path.display(), e);
            return None;
        }
    };
    if text.trim().is_empty() {
        warn!("  (no text found in {}, skipping)", path.display());
        return None;
    }
    let texts = chunker.split(&text);
    debug!("  -> {} chunks from {}", texts.len(), path.display());
    Some(DocumentChunks {
        locator: path.to_string_lossy().into_owned(),
        texts,
    })
}

/// Assigns corpus-wide ids in document order. Runs after all workers have
/// finished so ids never depend on completion order.
fn number_chunks(docs: Vec<DocumentChunks>) -> Vec<Vec<Chunk>> {
    let mut next_id = 0u64;
    docs.into_iter()
        .map(|doc| {
            doc.texts
                .into_iter()
                .enumerate()
                .map(|(local_index, text)| {
                    let chunk = Chunk {
                        global_id: next_id,
                        source_locator: doc.locator.clone(),
                        local_index,
                        text,
                    };
                    next_id += 1;
                    chunk
                })
                .collect()
        })
        .collect()
}
