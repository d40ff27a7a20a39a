use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, ScoringPolicy, StoreConfig, SttProviderConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if scoring cannot be satisfied by the configured
    /// providers or a provider is missing required settings
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_scoring()?;
        self.validate_store()?;
        self.validate_embeddings()?;
        self.validate_stt()?;
        Ok(())
    }

    fn validate_scoring(&self) -> anyhow::Result<()> {
        let threshold = self.scoring.threshold;

        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("scoring.threshold must be between 0 and 1, got {threshold}");
        }

        if self.scoring.policy == ScoringPolicy::Embedding && self.embeddings.providers.is_empty() {
            anyhow::bail!("scoring.policy = \"embedding\" requires at least one embeddings provider");
        }

        if self.scoring.model.trim().is_empty() {
            anyhow::bail!("scoring.model must not be empty");
        }

        Ok(())
    }

    fn validate_store(&self) -> anyhow::Result<()> {
        if let StoreConfig::Postgres(ref pg) = self.store
            && pg.url.expose_secret().trim().is_empty()
        {
            anyhow::bail!("store.url must not be empty");
        }

        Ok(())
    }

    fn validate_embeddings(&self) -> anyhow::Result<()> {
        for (name, provider) in &self.embeddings.providers {
            if provider.api_key.is_none() && provider.base_url.is_none() {
                anyhow::bail!("embeddings provider '{name}' needs an api_key or a base_url");
            }
        }

        Ok(())
    }

    fn validate_stt(&self) -> anyhow::Result<()> {
        for (name, provider) in &self.stt.providers {
            match provider {
                SttProviderConfig::Whisper { api_key, base_url, .. } => {
                    if api_key.is_none() && base_url.is_none() {
                        anyhow::bail!("STT provider '{name}' needs an api_key or a base_url");
                    }
                }
                SttProviderConfig::Command { command, .. } => {
                    if command.trim().is_empty() {
                        anyhow::bail!("STT provider '{name}' has an empty command");
                    }
                }
            }
        }

        Ok(())
    }
}
