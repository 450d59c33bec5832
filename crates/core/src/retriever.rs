//! Hybrid retrieval: exact vector search followed by a lexical re-rank.
//!
//! Candidates are ordered by lexical score first; vector similarity only
//! breaks ties.

use crate::embeddings::embed_query;
use crate::models::RetrievalCandidate;
use providers::EmbeddingProvider;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use storage::{similarity, KnowledgeBase};

pub const DEFAULT_TOP_K: usize = 8;

pub const STOPWORDS: &[&str] = &[
    "the", "is", "are", "a", "an", "of", "and", "to", "in", "under", "for", "on", "with", "this",
    "that", "it", "as", "by", "or", "be", "from", "at", "about", "into", "than", "then", "so",
    "such",
];

/// Distinct, lower-cased, non-stopword query tokens in first-seen order.
/// Punctuation separates tokens; apostrophes inside a word are kept.
pub fn query_terms(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

/// Number of `terms` occurring in `text` as case-insensitive substrings.
pub fn lexical_score(text: &str, terms: &[String]) -> u32 {
    let text = text.to_lowercase();
    terms.iter().filter(|t| text.contains(t.as_str())).count() as u32
}

/// Orders by `(lexical_score desc, vector_similarity desc)`; stable otherwise.
pub fn rerank(candidates: &mut [RetrievalCandidate]) {
    candidates.sort_by(|a, b| match b.lexical_score.cmp(&a.lexical_score) {
        Ordering::Equal => b.vector_similarity.total_cmp(&a.vector_similarity),
        other => other,
    });
}

#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    knowledge: Arc<KnowledgeBase>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            embedder,
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Embeds `query` once, takes the `top_k` nearest chunks and re-ranks
    /// them. An empty index or `top_k == 0` gives an empty list.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> anyhow::Result<Vec<RetrievalCandidate>> {
        if top_k == 0 || self.knowledge.is_empty() {
            return Ok(Vec::new());
        }
        let vector = embed_query(self.embedder.as_ref(), query).await?;
        let neighbors = self.knowledge.index().search(&vector, top_k)?;

        let terms = query_terms(query);
        let metadata = self.knowledge.metadata();
        let mut candidates: Vec<RetrievalCandidate> = neighbors
            .into_iter()
            .filter_map(|n| {
                let chunk = metadata.get(n.position)?;
                Some(RetrievalCandidate {
                    lexical_score: lexical_score(&chunk.text, &terms),
                    vector_similarity: similarity(n.distance),
                    chunk: chunk.clone(),
                })
            })
            .collect();
        rerank(&mut candidates);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::Chunk;

    fn candidate(id: u64, lexical_score: u32, vector_similarity: f32) -> RetrievalCandidate {
        RetrievalCandidate {
            chunk: Chunk {
                global_id: id,
                source_locator: "doc.pdf".into(),
                local_index: id as usize,
                text: String::new(),
            },
            lexical_score,
            vector_similarity,
        }
    }

    #[test]
    fn terms_drop_stopwords_punctuation_and_repeats() {
        assert_eq!(
            query_terms("What is the rent, under the Rent Act? rent."),
            vec!["what", "rent", "act"]
        );
    }

    #[test]
    fn terms_keep_inner_apostrophes() {
        assert_eq!(query_terms("Landlord won't return 'deposit'"), vec![
            "landlord", "won't", "return", "deposit"
        ]);
    }

    #[test]
    fn repeated_terms_score_once() {
        let terms = query_terms("bail bail bail hearing");
        assert_eq!(lexical_score("Bail is granted at the HEARING", &terms), 2);
        assert_eq!(lexical_score("nothing relevant", &terms), 0);
    }

    #[test]
    fn lexical_score_dominates_similarity() {
        let mut c = vec![
            candidate(0, 0, 0.99),
            candidate(1, 2, 0.10),
            candidate(2, 1, 0.50),
            candidate(3, 2, 0.40),
        ];
        rerank(&mut c);
        let ids: Vec<u64> = c.iter().map(|c| c.chunk.global_id).collect();
        assert_eq!(ids, vec![3, 1, 2, 0]);
    }
}
