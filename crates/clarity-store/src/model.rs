use serde::{Deserialize, Serialize};

/// Summary row returned by the scenario listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScenarioSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// A clinical scenario the trainee works through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Scenario {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub door_sign: Option<String>,
    /// Structured vitals, e.g. `{"heart_rate": 110, "bp": "90/60"}`
    #[serde(default)]
    pub vital_signs: Option<serde_json::Value>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Scenario {
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// One patient line and the response the trainee is expected to give
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prompt {
    pub id: i32,
    pub expected_response: String,
    pub patient_prompt: String,
    /// Not part of the API payload; prompts are always served per scenario
    #[serde(skip_serializing)]
    pub scenario_id: i32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sequence_order: Option<i32>,
}

/// Payload of the per-scenario prompt listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioPrompts {
    pub prompts: Vec<Prompt>,
    pub scenario: Scenario,
}
