use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::SttProvider;
use crate::{error::SttError, http_client::http_client, types::AudioFile};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// `OpenAI`-compatible Whisper transcription provider
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    language: Option<String>,
    name: String,
}

impl WhisperProvider {
    pub fn new(
        name: String,
        api_key: Option<SecretString>,
        base_url: Option<String>,
        model: String,
        language: Option<String>,
    ) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            api_key,
            model,
            language,
            name,
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, audio: &AudioFile<'_>) -> crate::error::Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));

        let bytes = tokio::fs::read(audio.path).await?;

        tracing::debug!(
            provider = %self.name,
            bytes = bytes.len(),
            model = %self.model,
            "Whisper transcription request"
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(audio.filename.to_string())
            .mime_str(audio.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let mut builder = self.client.post(&url).multipart(form);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = %self.name, "Whisper request failed: {e}");
            SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, "Whisper API error ({status}): {error_text}");

            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, "Failed to parse Whisper response: {e}");
            SttError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!(provider = %self.name, "Whisper transcription complete");

        Ok(result.text.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
