use std::path::Path;

use serde::Serialize;

/// Audio taken from an upload form
#[derive(Debug, Default)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    /// Client-side filename, used for the temp file suffix
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl AudioUpload {
    /// Suffix for the scoped file, `.webm` unless the filename has an extension
    pub fn suffix(&self) -> String {
        self.filename
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map_or_else(|| ".webm".to_string(), |ext| format!(".{ext}"))
    }
}

/// Audio file handed to a provider
pub(crate) struct AudioFile<'a> {
    pub path: &'a Path,
    pub filename: &'a str,
    pub content_type: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionResponse {
    pub transcript: String,
}
