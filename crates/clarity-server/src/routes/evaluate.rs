use axum::{Json, extract::State};
use clarity_evaluator::Evaluation;
use serde::Deserialize;

use super::ApiJson;
use crate::{
    error::{ApiError, RequestError, required},
    session::RequestSession,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    user_input: Option<String>,
    prompt_id: Option<PromptRef>,
}

/// Prompt id as sent by the client, a number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PromptRef {
    Id(i32),
    Text(String),
}

impl PromptRef {
    fn id(self) -> Result<i32, RequestError> {
        match self {
            Self::Id(id) => Ok(id),
            Self::Text(text) => text.trim().parse().map_err(|_| RequestError::InvalidField {
                field: "prompt_id",
                reason: format!("'{text}' is not an integer"),
            }),
        }
    }
}

/// Score a response against the prompt's expected response
///
/// The outcome is added to the caller's session tally.
pub async fn evaluate(
    State(state): State<AppState>,
    session: RequestSession,
    ApiJson(body): ApiJson<EvaluateRequest>,
) -> Result<Json<Evaluation>, ApiError> {
    let user_input = required(body.user_input, "user_input")?;
    let prompt_id = required(body.prompt_id, "prompt_id")?.id()?;

    let prompt = state
        .store
        .prompt(prompt_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Prompt not found"))?;

    let evaluation = state.evaluator.evaluate(&user_input, &prompt.expected_response).await?;

    session.record_outcome(evaluation.is_correct);

    tracing::info!(
        prompt_id,
        is_correct = evaluation.is_correct,
        score = %evaluation.score,
        "response evaluated"
    );

    Ok(Json(evaluation))
}
