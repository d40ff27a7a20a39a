#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod server;
mod types;

use std::sync::Arc;

pub use error::{EmbeddingsError, Result};
pub use provider::EmbeddingsProvider;
pub use server::Server;
pub use types::{EmbeddingRequest, EmbeddingResponse};

use server::EmbeddingsServerBuilder;

/// Build the embeddings server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &clarity_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        EmbeddingsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize embeddings server: {e}"))?,
    );
    Ok(server)
}
