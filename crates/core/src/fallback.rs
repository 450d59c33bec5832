//! Rule-based responder used while retrieval or embeddings are unavailable.

use crate::category::{infer_category, Category};

const OFFLINE_NOTICE: &str = "Our legal research assistant is temporarily offline, so this answer is generated from a lightweight rule-based helper.";

/// Builds a short routing reply from the question's keywords alone.
pub fn fallback_answer(question: &str) -> (String, Category) {
    let category = infer_category(question);
    let guidance = if category == Category::Other {
        " Please share more specifics so we can route you to the right expert."
    } else {
        " Consider booking a consultation with a specialised lawyer for tailored advice."
    };
    let reply = format!(
        "{} Based on your message, this appears related to {}.{}",
        OFFLINE_NOTICE, category, guidance
    );
    (reply, category)
}
