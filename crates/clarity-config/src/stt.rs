use std::path::PathBuf;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level STT configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Directory for scoped audio files; the OS temp dir when unset
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// STT provider configurations keyed by name; the first one is used
    #[serde(default)]
    pub providers: IndexMap<String, SttProviderConfig>,
}

/// Configuration for a single STT provider
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum SttProviderConfig {
    /// `OpenAI`-compatible Whisper transcription API
    Whisper {
        #[serde(default)]
        api_key: Option<SecretString>,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default = "default_whisper_model")]
        model: String,
        #[serde(default)]
        language: Option<String>,
    },
    /// Local transcription program, e.g. whisper.cpp
    ///
    /// `{input}` in `args` is replaced by the audio file path; the
    /// program's standard output is the transcript.
    Command {
        command: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}
