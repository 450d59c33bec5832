//! Plain-text and JSON renderings of command results.

use lawbot_core::pipeline::IngestSummary;
use lawbot_core::{ChatResponse, Responder, RetrievalCandidate};

pub fn summary_line(summary: &IngestSummary) -> String {
    if !summary.written {
        return format!(
            "build-index: {} sources ({} skipped), no index written",
            summary.sources, summary.skipped_sources
        );
    }
    format!(
        "build-index: {} sources ({} skipped), {} chunks, dimension {}",
        summary.sources,
        summary.skipped_sources,
        summary.chunks,
        summary.dimension.unwrap_or(0)
    )
}

pub fn summary_json(summary: &IngestSummary) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "sources": summary.sources,
        "skipped_sources": summary.skipped_sources,
        "chunks": summary.chunks,
        "dimension": summary.dimension,
        "written": summary.written,
    })
}

/// One line per candidate, best first, with a shortened text preview.
pub fn candidate_lines(candidates: &[RetrievalCandidate], preview_chars: usize) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(rank, c)| {
            let preview: String = c
                .chunk
                .text
                .chars()
                .take(preview_chars)
                .map(|ch| if ch == '\n' { ' ' } else { ch })
                .collect();
            format!(
                "{}. {} #{} lexical={} similarity={:.4} | {}",
                rank + 1,
                c.chunk.source_name(),
                c.chunk.local_index,
                c.lexical_score,
                c.vector_similarity,
                preview
            )
        })
        .collect()
}

pub fn answer_text(response: &ChatResponse) -> String {
    let mut out = String::new();
    if response.responder == Responder::Fallback {
        out.push_str("[fallback responder]\n");
    }
    out.push_str(response.answer.trim_end());
    out.push_str(&format!("\n\nCategory: {}\n", response.detected_category));
    if !response.sources.is_empty() {
        out.push_str("Sources:\n");
        for s in &response.sources {
            out.push_str(&format!("  - {} (chunk {})\n", s.source_locator, s.chunk_id));
        }
    }
    out
}
