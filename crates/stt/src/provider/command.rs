use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use super::SttProvider;
use crate::{error::SttError, types::AudioFile};

/// Placeholder in `args` replaced by the audio file path
const INPUT_PLACEHOLDER: &str = "{input}";

/// Local transcription program such as whisper.cpp
///
/// The program's standard output is the transcript.
pub(crate) struct CommandProvider {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(name: String, program: String, args: Vec<String>) -> Self {
        Self { name, program, args }
    }

    /// Arguments with the input path substituted, appended when no placeholder exists
    fn args_for(&self, path: &Path) -> Vec<String> {
        let input = path.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input))
            .collect();

        if !self.args.iter().any(|arg| arg.contains(INPUT_PLACEHOLDER)) {
            args.push(input.into_owned());
        }

        args
    }
}

#[async_trait]
impl SttProvider for CommandProvider {
    async fn transcribe(&self, audio: &AudioFile<'_>) -> crate::error::Result<String> {
        let args = self.args_for(audio.path);

        tracing::debug!(provider = %self.name, program = %self.program, "running transcription command");

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SttError::CommandFailed {
                status: "spawn".to_string(),
                stderr: format!("failed to run '{}': {e}", self.program),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(provider = %self.name, status = %output.status, "transcription command failed: {stderr}");

            return Err(SttError::CommandFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let transcript = String::from_utf8(output.stdout)
            .map_err(|e| SttError::MalformedResponse(format!("transcript is not UTF-8: {e}")))?;

        Ok(transcript.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
