use clarity_config::EmbeddingsProviderType;

use crate::{
    error::EmbeddingsError,
    provider::{EmbeddingsProvider, openai::OpenAiEmbeddingsProvider},
    types::{EmbeddingRequest, EmbeddingResponse},
};

/// Embeddings server that routes requests to the appropriate provider
pub struct Server {
    providers: Vec<Box<dyn EmbeddingsProvider>>,
}

impl Server {
    /// Assemble a server from already-built providers
    pub fn from_providers(providers: Vec<Box<dyn EmbeddingsProvider>>) -> Self {
        Self { providers }
    }

    /// Names of the configured providers, in routing order
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// Generate embeddings using the appropriate provider
    ///
    /// A model written as `provider/model` where `provider` is a configured
    /// provider name goes to that provider. Anything else goes to the first
    /// configured provider with the model name untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured or the provider fails
    pub async fn embed(&self, request: &EmbeddingRequest) -> crate::error::Result<EmbeddingResponse> {
        let routed = request
            .model
            .split_once('/')
            .and_then(|(prefix, _)| self.providers.iter().find(|p| p.name() == prefix));

        let provider = match routed {
            Some(provider) => provider,
            None => self.providers.first().ok_or_else(|| {
                EmbeddingsError::ProviderNotFound("No embeddings providers configured".to_string())
            })?,
        };

        tracing::debug!(provider = provider.name(), model = %request.model, "routing embeddings request");

        provider.embed(request).await
    }
}

/// Builder for constructing the embeddings server from configuration
pub(crate) struct EmbeddingsServerBuilder<'a> {
    config: &'a clarity_config::Config,
}

impl<'a> EmbeddingsServerBuilder<'a> {
    pub fn new(config: &'a clarity_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn EmbeddingsProvider>> = Vec::new();

        for (name, provider_config) in &self.config.embeddings.providers {
            tracing::debug!("Initializing embeddings provider: {name}");

            let provider: Box<dyn EmbeddingsProvider> = match provider_config.provider_type {
                EmbeddingsProviderType::Openai => {
                    if provider_config.api_key.is_none() && provider_config.base_url.is_none() {
                        return Err(EmbeddingsError::ConfigError(format!(
                            "embeddings provider '{name}' needs an api_key or a base_url"
                        )));
                    }

                    Box::new(OpenAiEmbeddingsProvider::new(
                        name.clone(),
                        provider_config.api_key.clone(),
                        provider_config.base_url.clone(),
                    ))
                }
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::debug!("No embeddings providers configured");
        } else {
            tracing::debug!("Embeddings server initialized with {} provider(s)", providers.len());
        }

        Ok(Server { providers })
    }
}
