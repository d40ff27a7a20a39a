use serde::Deserialize;

/// Liveness route settings under `[server.health]`
///
/// The route is served outside the session layer, so probes never create
/// sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    /// Route path, `/health` unless overridden
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::from("/health"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let health: HealthConfig = toml::from_str("path = \"/livez\"").unwrap();
        assert!(health.enabled);
        assert_eq!(health.path, "/livez");
    }
}
