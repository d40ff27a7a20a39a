use clarity_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Scenario store errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum StoreError {
    /// No prompt references the scenario
    #[error("No prompts found for this scenario")]
    NoPrompts(i32),

    /// Prompts exist but their scenario row does not
    #[error("Scenario not found")]
    ScenarioNotFound(i32),

    /// Query or connection failure
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Seed data could not be loaded
    #[error("Invalid seed data: {0}")]
    Seed(String),
}

impl HttpError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoPrompts(_) | Self::ScenarioNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Database(e) => Some(e.to_string()),
            Self::Seed(msg) => Some(msg.clone()),
            Self::NoPrompts(_) | Self::ScenarioNotFound(_) => None,
        }
    }
}
