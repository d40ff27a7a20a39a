pub(crate) mod command;
pub(crate) mod whisper;

use async_trait::async_trait;

use crate::types::AudioFile;

/// Trait for STT provider implementations
///
/// Providers read the audio from the path they are given; the file is
/// removed by the caller once `transcribe` returns.
#[async_trait]
pub(crate) trait SttProvider: Send + Sync {
    /// Transcribe the audio file to text
    async fn transcribe(&self, audio: &AudioFile<'_>) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
