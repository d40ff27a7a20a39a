/// Liveness probe; answers without touching the store or any upstream
pub async fn health() -> &'static str {
    "ok"
}
