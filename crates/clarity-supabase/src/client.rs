use std::{sync::OnceLock, time::Duration};

use clarity_config::SupabaseConfig;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{Result, SupabaseError};

fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .build()
                .unwrap_or_default()
        })
        .clone()
}

/// Handle on one Supabase project
#[derive(Clone)]
pub struct SupabaseClient {
    pub(crate) client: Client,
    pub(crate) url: Url,
    pub(crate) api_key: SecretString,
    pub(crate) results_table: String,
    storage_key: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: http_client(),
            storage_key: storage_key_for(&config.url),
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            results_table: config.results_table.clone(),
        }
    }

    /// Storage key the session is saved under, `sb-<project>-auth-token`
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.url
            .join(path)
            .map_err(|e| SupabaseError::ConnectionError(format!("invalid Supabase URL for {path}: {e}")))
    }

    /// Request with the project key attached; `bearer` overrides the key in `Authorization`
    pub(crate) fn request(&self, method: reqwest::Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        let key = self.api_key.expose_secret();

        self.client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(bearer.unwrap_or(key))
    }

    /// Send and turn a non-success status into `ProviderApiError`
    pub(crate) async fn send(&self, builder: RequestBuilder, operation: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Supabase request failed");
            SupabaseError::ConnectionError(e.to_string())
        })?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!(operation, status = %status, "Supabase API error: {body}");

        Err(SupabaseError::ProviderApiError {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Pull the human readable part out of a GoTrue or PostgREST error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

fn storage_key_for(url: &Url) -> String {
    let project = url
        .host_str()
        .and_then(|host| host.split('.').next())
        .filter(|label| !label.is_empty())
        .unwrap_or("local");

    format!("sb-{project}-auth-token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_project_ref() {
        let url = Url::parse("https://abcdefgh.supabase.co").unwrap();
        assert_eq!(storage_key_for(&url), "sb-abcdefgh-auth-token");
    }

    #[test]
    fn storage_key_for_local_host() {
        let url = Url::parse("http://127.0.0.1:54321").unwrap();
        assert_eq!(storage_key_for(&url), "sb-127-auth-token");
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"code":400,"msg":"User already registered"}"#), "User already registered");
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }
}
