use axum::Json;
use serde_json::{Value, json};

const ENDPOINTS: &[&str] = &[
    "GET /get_scenarios",
    "GET /get_prompt/{scenario_id}",
    "POST /evaluate",
    "GET /api/results",
    "POST /upload_audio",
    "POST /store_results",
    "POST /signup",
    "POST /signin",
    "POST /signout",
];

/// Service banner listing the available routes
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Clinical Clarity API",
        "endpoints": ENDPOINTS,
    }))
}
