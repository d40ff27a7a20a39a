use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
};
use clarity_core::{ErrorBody, HttpError};
use http::StatusCode;

/// Error returned by every handler
///
/// Any [`HttpError`] converts into it, so handlers use `?` on feature crate
/// results directly.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::plain(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        let error = Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: message.into(),
                details: Some(details.into()),
            },
        };
        tracing::error!(error = %error.body.error, details = ?error.body.details, "request failed");
        error
    }

    fn plain(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }
}

impl<E: HttpError> From<E> for ApiError {
    fn from(err: E) -> Self {
        let status = err.status_code();
        let body = ErrorBody::from_error(&err);

        if status.is_server_error() {
            tracing::error!(status = %status, error = %err, "request failed");
        } else {
            tracing::debug!(status = %status, error = %err, "request rejected");
        }

        Self { status, body }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Problems with the shape of an incoming request
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid request body: {}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("Invalid path: {}", .0.body_text())]
    Path(#[from] PathRejection),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl HttpError for RequestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Unwrap a required body field
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RequestError> {
    value.ok_or(RequestError::MissingField(field))
}
