use serde::{Deserialize, Serialize};

/// Request to embed one or more texts with a model
#[derive(Debug, Clone)]
pub struct EmbeddingRequest {
    /// Model identifier, optionally `provider/model`
    pub model: String,
    /// Texts to embed, in order
    pub input: Vec<String>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
        }
    }
}

/// One embedding vector per input, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Model that produced the vectors
    pub model: String,
    pub embeddings: Vec<Vec<f32>>,
}
