#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cors;
mod error;
mod health;
mod routes;
mod session;
mod state;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use clarity_config::Config;
use clarity_evaluator::Evaluator;
use clarity_supabase::SupabaseClient;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use session::{RequestSession, SessionStore};
use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the store, embeddings, or STT subsystems fail to
    /// initialize
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let store = clarity_store::build_store(&config.store).await?;
        let embeddings = clarity_embeddings::build_server(&config)?;
        let stt_state = stt::build_server(&config)?;
        let evaluator = Arc::new(Evaluator::new(&config.scoring, embeddings));

        let supabase = config.supabase.as_ref().map(SupabaseClient::new);
        if supabase.is_none() {
            tracing::warn!("no [supabase] section, account and results routes will fail");
        }

        tracing::info!(policy = ?evaluator.policy(), threshold = config.scoring.threshold, "scoring configured");

        let state = AppState {
            store,
            evaluator,
            stt: stt_state,
            supabase,
        };

        let mut app = Router::new()
            .route("/", get(routes::index))
            .route("/get_scenarios", get(routes::get_scenarios))
            .route("/get_prompt/{scenario_id}", get(routes::get_prompt))
            .route("/evaluate", post(routes::evaluate))
            .route("/api/results", get(routes::results))
            .route(
                "/upload_audio",
                post(routes::upload_audio).layer(DefaultBodyLimit::max(routes::AUDIO_BODY_LIMIT)),
            )
            .route("/store_results", post(routes::store_results))
            .route("/signup", post(routes::signup))
            .route("/signin", post(routes::signin))
            .route("/signout", post(routes::signout))
            .with_state(state);

        // Session (innermost, runs just before handlers)
        let sessions = SessionStore::new(&config.server.session);
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let sessions = sessions.clone();
            async move { session::session_middleware(sessions, req, next).await }
        }));

        // Health check sits outside the session layer
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
