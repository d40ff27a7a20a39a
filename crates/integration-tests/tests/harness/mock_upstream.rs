//! Mock upstream speaking the embeddings, Whisper, and Supabase protocols
//!
//! Embeddings come from a small fixed table so similarities are predictable.

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

pub const PASSWORD: &str = "correct-horse";
pub const ACCESS_TOKEN: &str = "user-jwt";

const VECTORS: &[(&str, [f32; 3])] = &[
    ("The patient is stable", [1.0, 0.0, 0.0]),
    ("the patient's condition is stable", [0.9, 0.1, 0.0]),
    ("I'm not sure", [0.0, 1.0, 0.0]),
];

pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    embedding_count: AtomicU32,
    transcription_count: AtomicU32,
    /// Filename of the last uploaded audio part
    last_filename: Mutex<Option<String>>,
    /// Transcriptions fail with 500 when set
    fail_transcription: bool,
    inserted: Mutex<Vec<(Option<String>, Value)>>,
    logouts: Mutex<Vec<String>>,
}

impl MockUpstream {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock whose transcription endpoint always fails
    pub async fn start_failing_transcription() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(fail_transcription: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            fail_transcription,
            ..MockState::default()
        });

        let app = Router::new()
            .route("/v1/embeddings", routing::post(handle_embeddings))
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/auth/v1/signup", routing::post(handle_signup))
            .route("/auth/v1/token", routing::post(handle_token))
            .route("/auth/v1/logout", routing::post(handle_logout))
            .route("/rest/v1/results", routing::post(handle_insert))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the OpenAI-compatible routes, including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Project URL for the Supabase routes
    pub fn supabase_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn embedding_count(&self) -> u32 {
        self.state.embedding_count.load(Ordering::Relaxed)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn last_filename(&self) -> Option<String> {
        self.state.last_filename.lock().unwrap().clone()
    }

    /// Rows inserted into the results table with the bearer token used
    pub fn inserted(&self) -> Vec<(Option<String>, Value)> {
        self.state.inserted.lock().unwrap().clone()
    }

    pub fn logouts(&self) -> Vec<String> {
        self.state.logouts.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

async fn handle_embeddings(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.embedding_count.fetch_add(1, Ordering::Relaxed);

    let data: Vec<Value> = body["input"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let vector = VECTORS
                .iter()
                .find(|(key, _)| Some(*key) == text.as_str())
                .map_or([0.0, 0.0, 1.0], |(_, v)| *v);
            json!({ "object": "embedding", "embedding": vector, "index": index })
        })
        .collect();

    Json(json!({ "object": "list", "data": data, "model": body["model"] }))
}

async fn handle_transcription(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> impl IntoResponse {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    let mut bytes = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            *state.last_filename.lock().unwrap() = field.file_name().map(str::to_owned);
            bytes = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        }
    }

    if state.fail_transcription {
        return (StatusCode::INTERNAL_SERVER_ERROR, "decoder crashed").into_response();
    }

    Json(json!({ "text": format!("received {bytes} bytes") })).into_response()
}

fn session_body(email: &str) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": "refresh-token",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": { "id": "user-1", "email": email }
    })
}

async fn handle_signup(Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["email"].as_str().unwrap_or_default();

    if email == "taken@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "code": 422, "msg": "User already registered" })),
        )
            .into_response();
    }

    Json(json!({ "id": "user-2", "email": email, "confirmation_sent_at": "2026-01-01T00:00:00Z" })).into_response()
}

async fn handle_token(Query(query): Query<Vec<(String, String)>>, Json(body): Json<Value>) -> impl IntoResponse {
    let password_grant = query.iter().any(|(k, v)| k == "grant_type" && v == "password");

    if !password_grant || body["password"] != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
        )
            .into_response();
    }

    Json(session_body(body["email"].as_str().unwrap_or_default())).into_response()
}

async fn handle_logout(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer(&headers) {
        state.logouts.lock().unwrap().push(token);
    }
    StatusCode::NO_CONTENT
}

async fn handle_insert(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=minimal") {
        return StatusCode::BAD_REQUEST;
    }

    state.inserted.lock().unwrap().push((bearer(&headers), body));
    StatusCode::CREATED
}
