#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Scores a trainee response against the expected response of a prompt

mod error;
mod similarity;

use std::sync::Arc;

use clarity_config::{ScoringConfig, ScoringPolicy};
use clarity_embeddings::{EmbeddingRequest, Server as EmbeddingsServer};
use serde::Serialize;

pub use error::{EvaluatorError, Result};
pub use similarity::{cosine_similarity, normalized_similarity, percentage};

/// Outcome of scoring one response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub is_correct: bool,
    /// Integer percentage such as `"83%"`
    pub score: String,
    #[serde(skip)]
    pub similarity: f64,
}

impl Evaluation {
    fn from_similarity(similarity: f64, threshold: f64) -> Self {
        Self {
            is_correct: similarity >= threshold,
            score: format!("{}%", percentage(similarity)),
            similarity,
        }
    }

    /// Verdict of a normalized string comparison; the threshold plays no part
    fn from_match(matched: bool) -> Self {
        let similarity = if matched { 1.0 } else { 0.0 };

        Self {
            is_correct: matched,
            score: format!("{}%", percentage(similarity)),
            similarity,
        }
    }
}

/// Response evaluator bound to one scoring policy
pub struct Evaluator {
    policy: ScoringPolicy,
    threshold: f64,
    model: String,
    embeddings: Arc<EmbeddingsServer>,
}

impl Evaluator {
    pub fn new(config: &ScoringConfig, embeddings: Arc<EmbeddingsServer>) -> Self {
        Self {
            policy: config.policy,
            threshold: config.threshold,
            model: config.model.clone(),
            embeddings,
        }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Score `user_input` against `expected`
    ///
    /// The embedding policy embeds both texts in a single request and never
    /// caches vectors.
    pub async fn evaluate(&self, user_input: &str, expected: &str) -> Result<Evaluation> {
        let evaluation = match self.policy {
            ScoringPolicy::Exact => Evaluation::from_match(normalize_text(user_input) == normalize_text(expected)),
            ScoringPolicy::Embedding => {
                let similarity = self.embedding_similarity(user_input, expected).await?;
                Evaluation::from_similarity(similarity, self.threshold)
            }
        };

        tracing::debug!(
            policy = ?self.policy,
            similarity = evaluation.similarity,
            is_correct = evaluation.is_correct,
            "response evaluated"
        );

        Ok(evaluation)
    }

    async fn embedding_similarity(&self, user_input: &str, expected: &str) -> Result<f64> {
        let request = EmbeddingRequest::new(self.model.clone(), vec![user_input.to_string(), expected.to_string()]);
        let response = self.embeddings.embed(&request).await?;

        let [user, reference] = response.embeddings.as_slice() else {
            return Err(EvaluatorError::VectorCount(response.embeddings.len()));
        };

        let cosine = cosine_similarity(user, reference)?;
        Ok(normalized_similarity(cosine))
    }
}

/// Lowercase, collapse whitespace runs, trim
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
