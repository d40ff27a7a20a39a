#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod error;
mod memory;
mod model;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use clarity_config::StoreConfig;

pub use error::{Result, StoreError};
pub use memory::{MemoryScenarioStore, SeedData};
pub use model::{Prompt, Scenario, ScenarioPrompts, ScenarioSummary};
pub use postgres::PgScenarioStore;

/// Read access to scenarios and their prompts
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// Every scenario, summarized
    async fn list_scenarios(&self) -> Result<Vec<ScenarioSummary>>;

    /// Full scenario record
    async fn scenario(&self, id: i32) -> Result<Option<Scenario>>;

    /// Prompts of a scenario ordered by ascending `sequence_order`, nulls last
    async fn prompts_for_scenario(&self, scenario_id: i32) -> Result<Vec<Prompt>>;

    /// Single prompt by id
    async fn prompt(&self, id: i32) -> Result<Option<Prompt>>;

    /// Scenario detail together with its ordered prompts
    ///
    /// Fails with [`StoreError::NoPrompts`] when nothing references the
    /// scenario, so an unknown id and an empty scenario look the same.
    async fn scenario_with_prompts(&self, scenario_id: i32) -> Result<ScenarioPrompts> {
        let prompts = self.prompts_for_scenario(scenario_id).await?;

        if prompts.is_empty() {
            return Err(StoreError::NoPrompts(scenario_id));
        }

        let scenario = self
            .scenario(scenario_id)
            .await?
            .ok_or(StoreError::ScenarioNotFound(scenario_id))?;

        Ok(ScenarioPrompts { prompts, scenario })
    }
}

/// Build the configured store
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail, or the
/// seed file is unreadable or inconsistent
pub async fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ScenarioStore>> {
    let store: Arc<dyn ScenarioStore> = match config {
        StoreConfig::Postgres(pg) => Arc::new(
            PgScenarioStore::connect(pg)
                .await
                .map_err(|e| anyhow::anyhow!("failed to initialize scenario store: {e}"))?,
        ),
        StoreConfig::Memory { seed_file } => {
            let store = match seed_file {
                Some(path) => MemoryScenarioStore::from_seed_file(path)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to load seed file {}: {e}", path.display()))?,
                None => MemoryScenarioStore::default(),
            };
            Arc::new(store)
        }
    };

    Ok(store)
}
