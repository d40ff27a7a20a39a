use axum::extract::Multipart;

use crate::{
    error::{Result, SttError},
    types::AudioUpload,
};

/// Form field carrying the recorded answer
const AUDIO_FIELD: &str = "audio";

/// Pull the `audio` field out of a multipart upload
///
/// Other fields are skipped.
///
/// # Errors
///
/// Returns `NoAudio` when the field is absent or empty, and `InvalidRequest`
/// when the form itself cannot be read
pub async fn read_audio_field(multipart: &mut Multipart) -> Result<AudioUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SttError::InvalidRequest(e.body_text()))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| SttError::InvalidRequest(format!("Failed to read audio data: {}", e.body_text())))?;

        if bytes.is_empty() {
            return Err(SttError::NoAudio);
        }

        return Ok(AudioUpload {
            bytes: bytes.to_vec(),
            filename,
            content_type,
        });
    }

    Err(SttError::NoAudio)
}
