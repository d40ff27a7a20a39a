use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    extract::{FromRequestParts, Request},
    middleware::Next,
    response::Response,
};
use clarity_config::SessionConfig;
use clarity_supabase::SessionStorage;
use http::{HeaderValue, header, request::Parts};
use mini_moka::sync::Cache;
use uuid::Uuid;

use crate::error::ApiError;

/// Server-side state of one browser session
#[derive(Debug, Default)]
pub struct SessionState {
    /// Identity provider storage items
    items: HashMap<String, String>,
    /// Correctness of each evaluated answer, in order
    outcomes: Vec<bool>,
}

/// Bounded, idle-expiring map from session id to state
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Arc<Mutex<SessionState>>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(config.capacity)
                .time_to_idle(config.ttl())
                .build(),
            config: config.clone(),
        }
    }

    /// Look up the session named by the cookie, or start a fresh one
    ///
    /// Returns the handle and whether it was newly created.
    pub fn resolve(&self, cookie_id: Option<&str>) -> (RequestSession, bool) {
        if let Some(id) = cookie_id
            && let Some(state) = self.sessions.get(&id.to_string())
        {
            return (
                RequestSession {
                    id: id.to_string(),
                    state,
                },
                false,
            );
        }

        let id = Uuid::new_v4().to_string();
        let state = Arc::new(Mutex::new(SessionState::default()));
        self.sessions.insert(id.clone(), Arc::clone(&state));

        tracing::debug!(session = %id, "session created");

        (RequestSession { id, state }, true)
    }

    fn cookie_value(&self, id: &str) -> String {
        let mut cookie = format!(
            "{}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.config.cookie_name, self.config.ttl_seconds
        );

        if self.config.secure {
            cookie.push_str("; Secure");
        }

        cookie
    }

    fn cookie_id<'r>(&self, request: &'r Request) -> Option<&'r str> {
        request
            .headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.config.cookie_name)
            .map(|(_, value)| value)
            .filter(|value| Uuid::parse_str(value).is_ok())
    }
}

/// Handle on the caller's session for the duration of a request
#[derive(Clone)]
pub struct RequestSession {
    id: String,
    state: Arc<Mutex<SessionState>>,
}

impl RequestSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one evaluation outcome
    pub fn record_outcome(&self, is_correct: bool) {
        self.lock().outcomes.push(is_correct);
    }

    /// `(correct, total)` over every outcome recorded in this session
    pub fn tally(&self) -> (usize, usize) {
        let state = self.lock();
        let correct = state.outcomes.iter().filter(|&&ok| ok).count();
        (correct, state.outcomes.len())
    }
}

impl SessionStorage for RequestSession {
    fn get_item(&self, key: &str) -> Option<String> {
        self.lock().items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        self.lock().items.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        self.lock().items.remove(key);
    }
}

impl<S> FromRequestParts<S> for RequestSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Session unavailable", "session middleware is not installed"))
    }
}

/// Attach the caller's session to the request
///
/// The cookie is written on every response so its `Max-Age` slides with the
/// server-side idle expiry instead of lapsing while the session is in use.
pub async fn session_middleware(store: SessionStore, mut request: Request, next: Next) -> Response {
    let (session, _) = store.resolve(store.cookie_id(&request));
    let id = session.id.clone();

    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;

    match HeaderValue::from_str(&store.cookie_value(&id)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("invalid session cookie: {e}"),
    }

    response
}
