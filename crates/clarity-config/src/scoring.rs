use serde::Deserialize;

/// How trainee responses are compared to the expected response
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub policy: ScoringPolicy,
    /// Minimum normalized similarity counted as correct
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Embedding model; a `provider/` prefix naming a configured provider selects it
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            threshold: default_threshold(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Cosine similarity of sentence embeddings
    #[default]
    Embedding,
    /// Case- and whitespace-insensitive equality
    Exact,
}

const fn default_threshold() -> f64 {
    0.75
}

fn default_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}
