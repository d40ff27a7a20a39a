use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Hosted identity and results backend
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: Url,
    /// Project API key sent as `apikey`
    pub api_key: SecretString,
    /// Table receiving one row per completed scenario
    #[serde(default = "default_results_table")]
    pub results_table: String,
}

fn default_results_table() -> String {
    "results".to_string()
}
