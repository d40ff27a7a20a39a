mod account;
mod audio;
mod evaluate;
mod index;
mod results;
mod scenarios;

pub use account::{signin, signout, signup, store_results};
pub use audio::{AUDIO_BODY_LIMIT, upload_audio};
pub use evaluate::evaluate;
pub use index::index;
pub use results::results;
pub use scenarios::{get_prompt, get_scenarios};

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, RequestError};

/// `Json` whose rejection renders as the common error body
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(RequestError::from)?;

        Ok(Self(value))
    }
}

/// `Path` whose rejection renders as the common error body
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(RequestError::from)?;

        Ok(Self(value))
    }
}
