//! Light question normalization before embedding.
//!
//! Questions are embedded as-is apart from whitespace cleanup; the grounding
//! instructions in the evaluator prompt carry the interpretation work.

/// Trim the question and collapse internal whitespace runs to single spaces.
pub fn normalize(question: &str) -> String {
    question.split_whitespace().collect::<Vec<_>>().join(" ")
}
