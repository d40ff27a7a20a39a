use std::path::PathBuf;

use clarity_config::SttProviderConfig;

use crate::{
    error::SttError,
    provider::{SttProvider, command::CommandProvider, whisper::WhisperProvider},
    scoped::ScopedAudioFile,
    types::{AudioFile, AudioUpload, TranscriptionResponse},
};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// STT server that owns the providers and the scoped file lifecycle
pub struct Server {
    providers: Vec<Box<dyn SttProvider>>,
    temp_dir: Option<PathBuf>,
}

impl Server {
    pub(crate) fn from_providers(providers: Vec<Box<dyn SttProvider>>, temp_dir: Option<PathBuf>) -> Self {
        Self { providers, temp_dir }
    }

    /// Transcribe an upload with the first configured provider
    ///
    /// The audio lives in a temporary file only while the provider runs; it is
    /// gone when this returns, whether transcription succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns `NoAudio` for an empty upload, otherwise any file or provider failure
    pub async fn transcribe(&self, upload: AudioUpload) -> crate::error::Result<TranscriptionResponse> {
        if upload.bytes.is_empty() {
            return Err(SttError::NoAudio);
        }

        let provider = self
            .providers
            .first()
            .ok_or_else(|| SttError::ProviderNotFound("No STT providers configured".to_string()))?;

        let suffix = upload.suffix();
        let filename = upload.filename.clone().unwrap_or_else(|| format!("audio{suffix}"));
        let content_type = upload
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let scoped = ScopedAudioFile::write(self.temp_dir.as_deref(), &suffix, upload.bytes).await?;

        tracing::debug!(provider = provider.name(), path = %scoped.path().display(), "transcribing upload");

        let result = provider
            .transcribe(&AudioFile {
                path: scoped.path(),
                filename: &filename,
                content_type: &content_type,
            })
            .await;

        if let Err(e) = scoped.close() {
            tracing::warn!("failed to remove temporary audio file: {e}");
        }

        let transcript = result?;

        tracing::debug!(chars = transcript.len(), "transcription complete");

        Ok(TranscriptionResponse { transcript })
    }
}

/// Builder for constructing the STT server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a clarity_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub fn new(config: &'a clarity_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn SttProvider>> = Vec::new();

        for (name, provider_config) in &self.config.stt.providers {
            tracing::debug!("Initializing STT provider: {name}");

            let provider: Box<dyn SttProvider> = match provider_config {
                SttProviderConfig::Whisper {
                    api_key,
                    base_url,
                    model,
                    language,
                } => {
                    if api_key.is_none() && base_url.is_none() {
                        return Err(SttError::ConfigError(format!(
                            "STT provider '{name}' needs an api_key or a base_url"
                        )));
                    }

                    Box::new(WhisperProvider::new(
                        name.clone(),
                        api_key.clone(),
                        base_url.clone(),
                        model.clone(),
                        language.clone(),
                    ))
                }
                SttProviderConfig::Command { command, args } => {
                    Box::new(CommandProvider::new(name.clone(), command.clone(), args.clone()))
                }
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::debug!("No STT providers configured");
        } else {
            tracing::debug!("STT server initialized with {} provider(s)", providers.len());
        }

        Ok(Server::from_providers(providers, self.config.stt.temp_dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::Path,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;

    use super::*;

    /// Records the path it was given and checks the audio is readable there
    struct Recording {
        seen: Arc<Mutex<Option<PathBuf>>>,
        fail: bool,
    }

    #[async_trait]
    impl SttProvider for Recording {
        async fn transcribe(&self, audio: &AudioFile<'_>) -> crate::error::Result<String> {
            let bytes = std::fs::read(audio.path)?;
            *self.seen.lock().unwrap() = Some(audio.path.to_path_buf());

            if self.fail {
                return Err(SttError::ProviderApiError {
                    status: 500,
                    message: "model crashed".to_string(),
                });
            }

            Ok(format!("{} bytes", bytes.len()))
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn server(dir: &Path, fail: bool) -> (Server, Arc<Mutex<Option<PathBuf>>>) {
        let seen = Arc::new(Mutex::new(None));
        let provider = Recording {
            seen: Arc::clone(&seen),
            fail,
        };

        (
            Server::from_providers(vec![Box::new(provider)], Some(dir.to_path_buf())),
            seen,
        )
    }

    fn upload(bytes: &[u8]) -> AudioUpload {
        AudioUpload {
            bytes: bytes.to_vec(),
            filename: Some("answer.wav".to_string()),
            content_type: Some("audio/wav".to_string()),
        }
    }

    #[tokio::test]
    async fn temp_file_is_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let (server, seen) = server(dir.path(), false);

        let response = server.transcribe(upload(b"12345")).await.unwrap();
        assert_eq!(response.transcript, "5 bytes");

        let path = seen.lock().unwrap().clone().unwrap();
        assert_eq!(path.extension().unwrap(), "wav");
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn temp_file_is_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (server, seen) = server(dir.path(), true);

        let err = server.transcribe(upload(b"12345")).await.unwrap_err();
        assert!(matches!(err, SttError::ProviderApiError { .. }));

        let path = seen.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let (server, seen) = server(dir.path(), false);

        let err = server.transcribe(upload(b"")).await.unwrap_err();
        assert!(matches!(err, SttError::NoAudio));
        assert!(seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn no_provider_is_a_server_error() {
        let err = Server::from_providers(Vec::new(), None)
            .transcribe(upload(b"1"))
            .await
            .unwrap_err();

        assert!(matches!(err, SttError::ProviderNotFound(_)));
    }

    #[test]
    fn builds_providers_from_config() {
        let config = clarity_config::Config::from_toml(
            r#"
[scoring]
policy = "exact"

[stt]
temp_dir = "/var/tmp"

[stt.providers.local]
type = "command"
command = "whisper-cli"
args = ["-f", "{input}"]

[stt.providers.openai]
type = "whisper"
api_key = "sk-test"
"#,
        )
        .unwrap();

        let server = SttServerBuilder::new(&config).build().unwrap();
        let names: Vec<_> = server.providers.iter().map(|p| p.name()).collect();

        assert_eq!(names, ["local", "openai"]);
        assert_eq!(server.temp_dir.as_deref(), Some(Path::new("/var/tmp")));
    }
}
