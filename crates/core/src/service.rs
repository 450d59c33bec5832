//! The online answer path, built once at startup and shared by reference.
//!
//! Flow: retrieve → assemble prompt → generate → resolve category. When the
//! retrieval stack could not be built the service answers through the
//! rule-based fallback instead and says so in [`ChatResponse::responder`].

use crate::category::{self, CategoryLabel, CategorySource, ResolvedCategory};
use crate::config::{AppConfig, RetrievalConfig};
use crate::fallback::fallback_answer;
use crate::generation::GenerationClient;
use crate::models::{ChatResponse, Responder, SourceChunk};
use crate::prompt;
use crate::retriever::Retriever;
use providers::ProviderRegistry;
use std::sync::Arc;
use storage::KnowledgeBase;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message cannot be empty.")]
    EmptyMessage,
}

#[derive(Clone)]
pub struct RagEngine {
    retriever: Retriever,
    generator: GenerationClient,
}

impl RagEngine {
    pub fn new(retriever: Retriever, generator: GenerationClient) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }
}

/// Whether the retrieval stack could be built.
pub enum Availability {
    Ready(RagEngine),
    Unavailable { reason: String },
}

pub struct ChatService {
    availability: Availability,
    retrieval: RetrievalConfig,
}

impl ChatService {
    pub fn new(availability: Availability, retrieval: RetrievalConfig) -> Self {
        Self {
            availability,
            retrieval,
        }
    }

    /// Loads the persisted index pair and resolves providers. Missing
    /// artifacts or a missing embedder leave the service `Unavailable`; a
    /// missing generation provider only degrades individual answers.
    pub fn from_config(config: &AppConfig, registry: &ProviderRegistry) -> Self {
        let availability = match Self::connect(config, registry) {
            Ok(engine) => Availability::Ready(engine),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!("RAG pipeline disabled: {}", reason);
                Availability::Unavailable { reason }
            }
        };
        Self::new(availability, config.retrieval.clone())
    }

    fn connect(config: &AppConfig, registry: &ProviderRegistry) -> anyhow::Result<RagEngine> {
        let embedder = registry.embedding(None)?;
        let knowledge =
            KnowledgeBase::load(&config.index.index_path(), &config.index.metadata_path())?;
        let llm = match registry.llm(None) {
            Ok(llm) => Some(llm),
            Err(e) => {
                warn!("Generation provider unavailable: {}", e);
                None
            }
        };
        info!("RAG pipeline ready with {} indexed chunks", knowledge.len());
        Ok(RagEngine::new(
            Retriever::new(embedder, Arc::new(knowledge)),
            GenerationClient::new(llm, &config.generation),
        ))
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Ready(_))
    }

    pub async fn answer(&self, message: &str) -> Result<ChatResponse, ChatError> {
        let question = message.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let engine = match &self.availability {
            Availability::Ready(engine) => engine,
            Availability::Unavailable { reason } => {
                debug!("Fallback responder engaged: {}", reason);
                return Ok(fallback_response(question));
            }
        };

        let candidates = match engine
            .retriever
            .retrieve(question, self.retrieval.top_k)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Retrieval failed, using fallback responder: {:#}", e);
                return Ok(fallback_response(question));
            }
        };

        let prompt = prompt::assemble(question, candidates.iter().map(|c| &c.chunk));
        let generation = engine.generator.generate(&prompt).await;
        let category = category::resolve(generation.completed(), question);
        let sources = candidates
            .iter()
            .map(|c| SourceChunk::from_chunk(&c.chunk, self.retrieval.source_preview_chars))
            .collect();

        Ok(ChatResponse {
            answer: generation.into_text(),
            sources,
            detected_category: category.label.to_string(),
            category,
            responder: Responder::Rag,
        })
    }
}

fn fallback_response(question: &str) -> ChatResponse {
    let (answer, category) = fallback_answer(question);
    let category = ResolvedCategory {
        label: CategoryLabel::Known(category),
        source: CategorySource::Keyword,
    };
    ChatResponse {
        answer,
        sources: Vec::new(),
        detected_category: category.label.to_string(),
        category,
        responder: Responder::Fallback,
    }
}
