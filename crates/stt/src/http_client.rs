use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Transcribing a long answer can take a while on CPU-bound backends
const TRANSCRIPTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Pooled client shared by the HTTP transcription providers
pub(crate) fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(TRANSCRIPTION_TIMEOUT)
                .connect_timeout(Duration::from_secs(10))
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .unwrap_or_default()
        })
        .clone()
}
