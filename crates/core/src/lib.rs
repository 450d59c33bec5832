//! Core library: chunking, ingestion, hybrid retrieval, prompt assembly,
//! generation and category resolution.

pub mod category;
pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod extractor;
pub mod fallback;
pub mod generation;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod registry;
pub mod retriever;
pub mod service;

pub use category::{Category, CategoryLabel, CategorySource, ResolvedCategory};
pub use models::{ChatResponse, Responder, RetrievalCandidate, SourceChunk};
pub use service::{Availability, ChatError, ChatService, RagEngine};
