use clarity_core::HttpError;
use clarity_embeddings::EmbeddingsError;
use http::StatusCode;

pub type Result<T> = std::result::Result<T, EvaluatorError>;

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error(transparent)]
    Embeddings(#[from] EmbeddingsError),

    #[error("embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("zero-norm embedding")]
    ZeroNorm,

    #[error("expected 2 embeddings, got {0}")]
    VectorCount(usize),
}

impl HttpError for EvaluatorError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn client_message(&self) -> String {
        match self {
            Self::Embeddings(inner) => inner.client_message(),
            _ => "Embedding model failed".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.to_string())
    }
}
