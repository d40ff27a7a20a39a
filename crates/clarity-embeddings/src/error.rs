use clarity_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingsError>;

/// Embedding model errors
///
/// Every variant is a server-side failure from the trainee's point of view;
/// the variant text travels as `details`.
#[derive(Debug, Error)]
pub enum EmbeddingsError {
    /// Provider not found in configuration
    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The provider answered with something other than one vector per input
    #[error("Malformed embeddings response: {0}")]
    MalformedResponse(String),
}

impl HttpError for EmbeddingsError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn client_message(&self) -> String {
        "Embedding model failed".to_string()
    }

    fn details(&self) -> Option<String> {
        Some(self.to_string())
    }
}
