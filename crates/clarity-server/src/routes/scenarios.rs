use axum::{Json, extract::State};
use clarity_store::{ScenarioPrompts, ScenarioSummary};

use super::ApiPath;
use crate::{error::ApiError, state::AppState};

pub async fn get_scenarios(State(state): State<AppState>) -> Result<Json<Vec<ScenarioSummary>>, ApiError> {
    let scenarios = state.store.list_scenarios().await?;
    tracing::debug!(count = scenarios.len(), "listed scenarios");
    Ok(Json(scenarios))
}

/// Scenario detail with its prompts in sequence order
pub async fn get_prompt(
    State(state): State<AppState>,
    ApiPath(scenario_id): ApiPath<i32>,
) -> Result<Json<ScenarioPrompts>, ApiError> {
    let payload = state.store.scenario_with_prompts(scenario_id).await?;
    tracing::debug!(scenario_id, prompts = payload.prompts.len(), "served scenario prompts");
    Ok(Json(payload))
}
