//! Programmatic configuration builder for integration tests

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use clarity_config::{
    Config, CorsConfig, EmbeddingsProviderConfig, EmbeddingsProviderType, ScoringConfig, ScoringPolicy, ServerConfig,
    StoreConfig, SttProviderConfig, SupabaseConfig,
};
use secrecy::SecretString;

/// Seed data shared by every test
pub fn seed_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/seed.json")
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal config: seeded memory store, exact scoring, no upstreams
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                store: StoreConfig::Memory {
                    seed_file: Some(seed_file()),
                },
                scoring: ScoringConfig {
                    policy: ScoringPolicy::Exact,
                    ..ScoringConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Score with embeddings from the mock upstream
    pub fn with_embeddings(mut self, base_url: &str, threshold: f64) -> Self {
        self.config.embeddings.providers.insert(
            "mock".to_owned(),
            EmbeddingsProviderConfig {
                provider_type: EmbeddingsProviderType::Openai,
                api_key: Some(SecretString::from("test-key".to_owned())),
                base_url: Some(base_url.to_owned()),
            },
        );
        self.config.scoring = ScoringConfig {
            policy: ScoringPolicy::Embedding,
            threshold,
            model: "mock/all-MiniLM-L6-v2".to_owned(),
        };
        self
    }

    /// Transcribe through the mock Whisper endpoint
    pub fn with_whisper(mut self, base_url: &str) -> Self {
        self.config.stt.providers.insert(
            "whisper".to_owned(),
            SttProviderConfig::Whisper {
                api_key: Some(SecretString::from("test-key".to_owned())),
                base_url: Some(base_url.to_owned()),
                model: "whisper-1".to_owned(),
                language: None,
            },
        );
        self
    }

    /// Transcribe by running a local program
    pub fn with_command(mut self, command: &str, args: &[&str]) -> Self {
        self.config.stt.providers.insert(
            "local".to_owned(),
            SttProviderConfig::Command {
                command: command.to_owned(),
                args: args.iter().map(|a| (*a).to_owned()).collect(),
            },
        );
        self
    }

    /// Directory scoped audio files are written to
    pub fn with_temp_dir(mut self, dir: &Path) -> Self {
        self.config.stt.temp_dir = Some(dir.to_path_buf());
        self
    }

    /// Point the identity and results client at the mock
    pub fn with_supabase(mut self, url: &str) -> Self {
        self.config.supabase = Some(SupabaseConfig {
            url: url.parse().expect("valid URL"),
            api_key: SecretString::from("anon-key".to_owned()),
            results_table: "results".to_owned(),
        });
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
