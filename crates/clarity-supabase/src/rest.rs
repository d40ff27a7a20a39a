use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{client::SupabaseClient, error::Result, storage::SessionStorage};

/// Row id that may arrive as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

/// One completed scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub user_id: Identifier,
    pub scenario_id: Identifier,
    pub category: String,
    pub num_correct: i64,
    pub num_prompts: i64,
}

impl SupabaseClient {
    /// Insert one row into the results table
    ///
    /// Uses the caller's access token when signed in so row-level security
    /// applies; otherwise the project key.
    pub async fn insert_result(&self, record: &ResultRecord, storage: &dyn SessionStorage) -> Result<()> {
        let session = self.stored_session(storage)?;
        let url = self.endpoint(&format!("/rest/v1/{}", self.results_table))?;

        let builder = self
            .request(Method::POST, url, session.as_ref().map(|s| s.access_token.as_str()))
            .header("Prefer", "return=minimal")
            .json(record);

        self.send(builder, "insert_result").await?;

        tracing::info!(table = %self.results_table, "result stored");
        Ok(())
    }
}
