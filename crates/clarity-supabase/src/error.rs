use clarity_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SupabaseError>;

#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Sign-in rejected, or accepted without issuing a session
    #[error("Invalid login credentials: {0}")]
    InvalidCredentials(String),

    #[error("Supabase API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Malformed Supabase response: {0}")]
    MalformedResponse(String),

    /// The stored session could not be read back
    #[error("Stored session is unreadable: {0}")]
    Storage(String),
}

impl HttpError for SupabaseError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidCredentials(_) => "Invalid credentials".to_string(),
            _ => "Supabase request failed".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.to_string())
    }
}
