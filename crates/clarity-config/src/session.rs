use std::time::Duration;

use serde::Deserialize;

/// Browser session settings
///
/// Sessions carry the identity provider's stored tokens and the running
/// tally of evaluated answers for one trainee.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Name of the cookie holding the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Idle lifetime of a session in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Maximum number of live sessions kept in memory
    #[serde(default = "default_capacity")]
    pub capacity: u64,
    /// Mark the cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_seconds: default_ttl_seconds(),
            capacity: default_capacity(),
            secure: false,
        }
    }
}

fn default_cookie_name() -> String {
    "clarity_session".to_string()
}

const fn default_ttl_seconds() -> u64 {
    60 * 60 * 4
}

const fn default_capacity() -> u64 {
    10_000
}
