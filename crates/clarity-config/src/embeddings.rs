use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Sentence embedding backends used for answer scoring
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingsConfig {
    /// Keyed by name; `scoring.model` may be prefixed with a key to pick one,
    /// otherwise the first entry serves every request
    #[serde(default)]
    pub providers: IndexMap<String, EmbeddingsProviderConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingsProviderConfig {
    #[serde(rename = "type")]
    pub provider_type: EmbeddingsProviderType,
    /// Sent as a bearer token when present
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Root of an `OpenAI`-compatible API, e.g. a local sentence-transformers
    /// server at `http://localhost:8081/v1`
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingsProviderType {
    /// `POST {base_url}/embeddings` with `{ input, model }`
    Openai,
}
