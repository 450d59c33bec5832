#![allow(dead_code)]

use lawbot_core::config::AppConfig;
use lawbot_core::extractor::TextExtractor;
use providers::{CompletionRequest, EmbedResponse, EmbeddingProvider, LlmProvider, ProviderError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const DIM: usize = 64;

/// Hashes word tokens into a fixed number of buckets. Identical texts get
/// identical vectors.
pub struct BagOfWords;

pub fn bag_of_words(text: &str) -> Vec<f32> {
    let mut v = vec![0.0f32; DIM];
    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let mut h: u32 = 0x811c9dc5;
        for b in token.bytes() {
            h ^= b as u32;
            h = h.wrapping_mul(0x01000193);
        }
        v[(h as usize) % DIM] += 1.0;
    }
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

#[async_trait::async_trait]
impl EmbeddingProvider for BagOfWords {
    async fn embed(&self, texts: &[String]) -> Result<EmbedResponse, ProviderError> {
        Ok(EmbedResponse {
            vectors: texts.iter().map(|t| bag_of_words(t)).collect(),
        })
    }
}

/// Returns a different dimension after the first call.
#[derive(Default)]
pub struct ShiftingDimension {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for ShiftingDimension {
    async fn embed(&self, texts: &[String]) -> Result<EmbedResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let dim = if call == 0 { 4 } else { 5 };
        Ok(EmbedResponse {
            vectors: vec![vec![0.5; dim]; texts.len()],
        })
    }
}

pub struct FailingEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<EmbedResponse, ProviderError> {
        Err(ProviderError::RequestFailed("connection refused".into()))
    }
}

/// Replies with a fixed answer and records the prompts it was sent.
pub struct ScriptedLlm {
    pub reply: String,
    pub prompts: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

pub struct FailingLlm;

#[async_trait::async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Status {
            status: 503,
            body: "upstream unavailable".into(),
        })
    }
}

/// Reads files as text but refuses any path whose name contains "corrupt".
pub struct PickyExtractor;

impl TextExtractor for PickyExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String> {
        let name = path.file_name().unwrap().to_string_lossy();
        anyhow::ensure!(!name.contains("corrupt"), "cannot parse {}", name);
        Ok(std::fs::read_to_string(path)?)
    }
}

pub const TENANCY: &str = "A landlord must return the security deposit within one month \
after the tenant vacates the premises, less deductions for damage beyond normal wear. \
Disputes about deposits may be taken to the rent controller.";

pub const BAIL: &str = "Bail is the conditional release of an accused person. \
For bailable offences bail is a right; for non-bailable offences the magistrate decides \
after considering the gravity of the accusation.";

pub const CYBER: &str = "Phishing and identity theft online are punishable under the \
Information Technology Act. Victims should preserve screenshots and report to the cyber cell.";

/// Test corpus of plain-text documents plus a config pointing at it.
pub fn corpus(dir: &Path, docs: &[(&str, &str)]) -> AppConfig {
    let corpus_dir = dir.join("docs");
    std::fs::create_dir_all(&corpus_dir).unwrap();
    for (name, text) in docs {
        std::fs::write(corpus_dir.join(name), text).unwrap();
    }
    let mut cfg = AppConfig::default();
    cfg.corpus.dir = corpus_dir.to_string_lossy().into_owned();
    cfg.corpus.extensions = vec!["txt".to_string()];
    cfg.index.dir = dir.join("index").to_string_lossy().into_owned();
    cfg.chunking.chunk_size = 80;
    cfg.chunking.overlap = 20;
    cfg.chunking.batch_size = 2;
    cfg
}

pub fn standard_corpus(dir: &Path) -> AppConfig {
    corpus(
        dir,
        &[("tenancy.txt", TENANCY), ("bail.txt", BAIL), ("cyber.txt", CYBER)],
    )
}

pub fn index_paths(cfg: &AppConfig) -> (PathBuf, PathBuf) {
    (cfg.index.index_path(), cfg.index.metadata_path())
}
