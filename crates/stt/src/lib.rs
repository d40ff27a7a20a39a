#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Speech-to-text for uploaded answers
//!
//! Uploaded audio is written to a scoped temporary file, handed to the
//! configured provider by path, and removed before the call returns.

mod error;
mod http_client;
mod provider;
mod request;
mod scoped;
mod server;
mod types;

use std::sync::Arc;

pub use error::{Result, SttError};
pub use request::read_audio_field;
pub use server::{Server, SttServerBuilder};
pub use types::{AudioUpload, TranscriptionResponse};

/// Build the STT server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &clarity_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}
