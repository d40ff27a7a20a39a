use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Human-readable message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Raw upstream failure text, only reported for internal errors
    fn details(&self) -> Option<String> {
        None
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Build the body for an error, attaching details only for server-side failures
    pub fn from_error<E: HttpError + ?Sized>(err: &E) -> Self {
        let details = if err.status_code().is_server_error() {
            err.details()
        } else {
            None
        };

        Self {
            error: err.client_message(),
            details,
        }
    }
}
