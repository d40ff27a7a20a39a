pub(crate) mod openai;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{EmbeddingRequest, EmbeddingResponse},
};

/// Trait for embeddings provider implementations
#[async_trait]
pub trait EmbeddingsProvider: Send + Sync {
    /// Generate embeddings for the given request
    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
