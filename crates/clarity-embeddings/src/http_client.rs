use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Shared HTTP client so embedding calls reuse pooled connections
pub(crate) fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = http::HeaderMap::new();
            headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

            Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .default_headers(headers)
                .build()
                .unwrap_or_default()
        })
        .clone()
}
