use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use stt::{SttError, TranscriptionResponse};

use crate::{error::ApiError, state::AppState};

/// Largest accepted audio upload
pub const AUDIO_BODY_LIMIT: usize = 32 << 20;

/// Transcribe the `audio` field of a multipart upload
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("upload is not multipart: {}", rejection.body_text());
        SttError::NoAudio
    })?;

    let upload = stt::read_audio_field(&mut multipart).await?;

    tracing::debug!(bytes = upload.bytes.len(), filename = ?upload.filename, "audio received");

    let response = state.stt.transcribe(upload).await?;

    Ok(Json(response))
}
