use async_trait::async_trait;
use clarity_config::PostgresStoreConfig;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{
    ScenarioStore,
    error::{Result, StoreError},
    model::{Prompt, Scenario, ScenarioSummary},
};

const PROMPT_COLUMNS: &str = "id, expected_response, patient_prompt, scenario_id, category, sequence_order";

/// Postgres-backed scenario store
#[derive(Debug, Clone)]
pub struct PgScenarioStore {
    pool: PgPool,
}

impl PgScenarioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and optionally apply the bundled migrations
    pub async fn connect(config: &PostgresStoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.url.expose_secret())
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| StoreError::Database(e.into()))?;
            tracing::info!("scenario store migrations applied");
        }

        tracing::debug!(max_connections = config.max_connections, "scenario store connected");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ScenarioStore for PgScenarioStore {
    async fn list_scenarios(&self) -> Result<Vec<ScenarioSummary>> {
        let rows = sqlx::query_as::<_, ScenarioSummary>("SELECT id, title, description FROM scenarios ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn scenario(&self, id: i32) -> Result<Option<Scenario>> {
        let row = sqlx::query_as::<_, Scenario>(
            "SELECT id, title, description, door_sign, vital_signs, instructions FROM scenarios WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn prompts_for_scenario(&self, scenario_id: i32) -> Result<Vec<Prompt>> {
        let rows = sqlx::query_as::<_, Prompt>(&format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts WHERE scenario_id = $1 ORDER BY sequence_order ASC, id ASC"
        ))
        .bind(scenario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn prompt(&self, id: i32) -> Result<Option<Prompt>> {
        let row = sqlx::query_as::<_, Prompt>(&format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(pool: &PgPool) {
        sqlx::query(
            "INSERT INTO scenarios (id, title, description, door_sign, vital_signs) VALUES \
             (2, 'Discharge briefing', 'Explaining medication', NULL, NULL), \
             (1, 'Post-operative check', 'Day one after surgery', 'Bed 4', '{\"spo2\": 97}'), \
             (3, 'Empty', 'No prompts yet', NULL, NULL)",
        )
        .execute(pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO prompts (id, expected_response, patient_prompt, scenario_id, category, sequence_order) VALUES \
             (20, 'a', 'p', 1, NULL, NULL), \
             (15, 'b', 'p', 1, NULL, NULL), \
             (9, 'c', 'p', 1, 'vitals', 2), \
             (4, 'd', 'p', 1, 'vitals', 2), \
             (7, 'e', 'p', 1, 'intro', 1)",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    // Needs a reachable server: `DATABASE_URL=postgres://... cargo test -- --ignored`
    #[ignore = "requires DATABASE_URL"]
    #[sqlx::test(migrations = "./migrations")]
    async fn queries_follow_store_contract(pool: PgPool) {
        seed(&pool).await;
        let store = PgScenarioStore::new(pool);

        let ids: Vec<i32> = store.list_scenarios().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let detail = store.scenario_with_prompts(1).await.unwrap();
        let order: Vec<i32> = detail.prompts.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![7, 4, 9, 15, 20]);
        assert_eq!(detail.scenario.vital_signs, Some(serde_json::json!({ "spo2": 97 })));

        assert!(matches!(
            store.scenario_with_prompts(3).await.unwrap_err(),
            StoreError::NoPrompts(3)
        ));
        assert_eq!(store.prompt(4).await.unwrap().unwrap().expected_response, "d");
        assert!(store.prompt(404).await.unwrap().is_none());
    }
}
