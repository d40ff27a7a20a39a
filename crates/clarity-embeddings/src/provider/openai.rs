use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::EmbeddingsProvider;
use crate::{
    error::{EmbeddingsError, Result},
    http_client::http_client,
    types::{EmbeddingRequest, EmbeddingResponse},
};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Embeddings provider speaking the `OpenAI` `/embeddings` protocol
///
/// Also serves self-hosted sentence-transformer servers that expose the
/// same route, in which case no API key is needed.
pub(crate) struct OpenAiEmbeddingsProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl OpenAiEmbeddingsProvider {
    pub fn new(name: String, api_key: Option<SecretString>, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            name,
            client: http_client(),
            api_key,
            base_url,
        }
    }

    /// Strip our own "provider/" prefix from a model name
    ///
    /// Only the configured provider name is stripped, so upstream names such as
    /// `sentence-transformers/all-MiniLM-L6-v2` pass through intact.
    fn upstream_model<'m>(&self, model: &'m str) -> &'m str {
        model
            .strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(model)
    }
}

#[derive(Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingsProvider for OpenAiEmbeddingsProvider {
    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
        let model = self.upstream_model(&request.model);

        let wire_request = OpenAiEmbeddingRequest {
            input: &request.input,
            model,
            encoding_format: "float",
        };

        tracing::debug!(
            provider = %self.name,
            model = %model,
            inputs = request.input.len(),
            "sending embeddings request"
        );

        let mut builder = self.client.post(&url).json(&wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "embeddings request failed");
            EmbeddingsError::ConnectionError(format!("Failed to reach embeddings provider: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                provider = %self.name,
                status = %status,
                "embeddings API error: {error_text}"
            );

            return Err(EmbeddingsError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let mut wire_response: OpenAiEmbeddingResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse embeddings response");
            EmbeddingsError::MalformedResponse(e.to_string())
        })?;

        if wire_response.data.len() != request.input.len() {
            return Err(EmbeddingsError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                request.input.len(),
                wire_response.data.len()
            )));
        }

        wire_response.data.sort_by_key(|d| d.index);

        tracing::debug!(provider = %self.name, "embeddings request complete");

        Ok(EmbeddingResponse {
            model: wire_response.model.unwrap_or_else(|| model.to_string()),
            embeddings: wire_response.data.into_iter().map(|d| d.embedding).collect(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
