#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod embeddings;
mod env;
pub mod health;
mod loader;
pub mod scoring;
pub mod server;
pub mod session;
pub mod store;
pub mod stt;
pub mod supabase;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use embeddings::*;
pub use health::*;
pub use scoring::*;
pub use server::*;
pub use session::*;
pub use store::*;
pub use stt::*;
pub use supabase::*;
pub use telemetry::*;

/// Top-level Clarity configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Scenario and prompt store
    #[serde(default)]
    pub store: StoreConfig,
    /// Embeddings provider configuration
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    /// STT provider configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Response scoring policy
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Hosted identity and results backend
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
