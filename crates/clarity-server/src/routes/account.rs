use axum::{Json, extract::State};
use clarity_supabase::{Credentials, Identifier, ResultRecord};
use serde::Deserialize;
use serde_json::{Value, json};

use super::ApiJson;
use crate::{
    error::{ApiError, required},
    session::RequestSession,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    email: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    fn into_credentials(self) -> Result<Credentials, ApiError> {
        Ok(Credentials {
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
        })
    }
}

pub async fn signup(
    State(state): State<AppState>,
    session: RequestSession,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<Value>, ApiError> {
    let credentials = body.into_credentials()?;
    let data = state.supabase()?.sign_up(&credentials, &session).await?;

    Ok(Json(json!({ "message": "Signup successful", "data": data })))
}

pub async fn signin(
    State(state): State<AppState>,
    session: RequestSession,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<Value>, ApiError> {
    let credentials = body.into_credentials()?;
    let auth = state.supabase()?.sign_in(&credentials, &session).await?;

    Ok(Json(json!({
        "message": "Signin successful",
        "session": {
            "access_token": auth.access_token,
            "refresh_token": auth.refresh_token,
            "expires_in": auth.expires_in,
            "user": auth.user,
        }
    })))
}

pub async fn signout(State(state): State<AppState>, session: RequestSession) -> Result<Json<Value>, ApiError> {
    state.supabase()?.sign_out(&session).await?;

    Ok(Json(json!({ "message": "Signout successful" })))
}

/// Body of a results submission; `null` counts as missing
#[derive(Debug, Deserialize)]
pub struct StoreResultsRequest {
    user_id: Option<Identifier>,
    scenario_id: Option<Identifier>,
    category: Option<String>,
    num_correct: Option<i64>,
    num_prompts: Option<i64>,
}

impl StoreResultsRequest {
    fn into_record(self) -> Result<ResultRecord, ApiError> {
        Ok(ResultRecord {
            user_id: required(self.user_id, "user_id")?,
            scenario_id: required(self.scenario_id, "scenario_id")?,
            category: required(self.category, "category")?,
            num_correct: required(self.num_correct, "num_correct")?,
            num_prompts: required(self.num_prompts, "num_prompts")?,
        })
    }
}

pub async fn store_results(
    State(state): State<AppState>,
    session: RequestSession,
    ApiJson(body): ApiJson<StoreResultsRequest>,
) -> Result<Json<Value>, ApiError> {
    let record = body.into_record()?;
    state.supabase()?.insert_result(&record, &session).await?;

    Ok(Json(json!({ "message": "Results stored successfully" })))
}
