use std::sync::Arc;

use clarity_evaluator::Evaluator;
use clarity_store::ScenarioStore;
use clarity_supabase::SupabaseClient;

use crate::error::ApiError;

/// Shared handles every route handler can reach
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScenarioStore>,
    pub evaluator: Arc<Evaluator>,
    pub stt: Arc<stt::Server>,
    pub supabase: Option<SupabaseClient>,
}

impl AppState {
    /// The Supabase client, or a 500 when the section is absent from config
    pub fn supabase(&self) -> Result<&SupabaseClient, ApiError> {
        self.supabase
            .as_ref()
            .ok_or_else(|| ApiError::internal("Supabase is not configured", "missing [supabase] configuration"))
    }
}
