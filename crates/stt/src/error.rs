use clarity_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

#[derive(Debug, Error)]
pub enum SttError {
    /// The form carried no `audio` field, or it was empty
    #[error("No audio file uploaded")]
    NoAudio,

    #[error("Invalid upload: {0}")]
    InvalidRequest(String),

    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Local transcription program exited unsuccessfully
    #[error("Transcription command failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("Temporary audio file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed transcription response: {0}")]
    MalformedResponse(String),
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoAudio | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::NoAudio | Self::InvalidRequest(_) => self.to_string(),
            _ => "Transcription failed".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.to_string())
    }
}
