//! Scoring engine: answers in, ranked classification out.

use thiserror::Error;

use limitless_types::{AnswerSet, CategoryTally, ContentTable, ScoringResult};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// The answer set was not built for this content table. A programming
    /// defect, never a user-recoverable condition.
    #[error("answer set has {answers} slot(s) but the quiz has {questions} question(s)")]
    AnswerCountMismatch { answers: usize, questions: usize },
}

/// Tally `answers` and rank the categories.
///
/// Counts start at zero for every category in canonical order; ties keep
/// that order, never the order answers were given. Unanswered slots count
/// for nothing.
pub fn score(answers: &AnswerSet, content: &ContentTable) -> Result<ScoringResult, ScoringError> {
    if answers.len() != content.question_count() {
        return Err(ScoringError::AnswerCountMismatch {
            answers: answers.len(),
            questions: content.question_count(),
        });
    }

    let mut scores = CategoryTally::new();
    for category in answers.iter().flatten() {
        scores.increment(category);
    }

    let [primary, secondary, ..] = scores.ranked();
    Ok(ScoringResult {
        primary: content.profile(primary).clone(),
        secondary: content.profile(secondary).clone(),
        scores,
    })
}
