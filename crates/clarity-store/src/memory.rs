use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    ScenarioStore,
    error::{Result, StoreError},
    model::{Prompt, Scenario, ScenarioSummary},
};

/// Seed file contents for the in-memory store
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

/// In-process store used for local runs and tests
///
/// Orders prompts like the Postgres store's `ORDER BY sequence_order ASC, id
/// ASC`: ascending with nulls last, ties broken by prompt id.
#[derive(Debug, Default)]
pub struct MemoryScenarioStore {
    scenarios: BTreeMap<i32, Scenario>,
    prompts: Vec<Prompt>,
}

impl MemoryScenarioStore {
    /// Build a store, rejecting prompts that reference a missing scenario
    pub fn new(seed: SeedData) -> Result<Self> {
        let mut scenarios = BTreeMap::new();

        for scenario in seed.scenarios {
            if scenario.title.trim().is_empty() {
                return Err(StoreError::Seed(format!("scenario {} has an empty title", scenario.id)));
            }
            if scenarios.insert(scenario.id, scenario).is_some() {
                return Err(StoreError::Seed("duplicate scenario id".to_string()));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for prompt in &seed.prompts {
            if !scenarios.contains_key(&prompt.scenario_id) {
                return Err(StoreError::Seed(format!(
                    "prompt {} references missing scenario {}",
                    prompt.id, prompt.scenario_id
                )));
            }
            if !seen.insert(prompt.id) {
                return Err(StoreError::Seed(format!("duplicate prompt id {}", prompt.id)));
            }
        }

        Ok(Self {
            scenarios,
            prompts: seed.prompts,
        })
    }

    /// Load a JSON seed file of the form `{"scenarios": [...], "prompts": [...]}`
    pub async fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Seed(e.to_string()))?;

        let seed: SeedData = serde_json::from_str(&raw).map_err(|e| StoreError::Seed(e.to_string()))?;

        let store = Self::new(seed)?;

        tracing::info!(
            scenarios = store.scenarios.len(),
            prompts = store.prompts.len(),
            "loaded scenario seed data"
        );

        Ok(store)
    }
}

#[async_trait]
impl ScenarioStore for MemoryScenarioStore {
    async fn list_scenarios(&self) -> Result<Vec<ScenarioSummary>> {
        Ok(self.scenarios.values().map(Scenario::summary).collect())
    }

    async fn scenario(&self, id: i32) -> Result<Option<Scenario>> {
        Ok(self.scenarios.get(&id).cloned())
    }

    async fn prompts_for_scenario(&self, scenario_id: i32) -> Result<Vec<Prompt>> {
        let mut prompts: Vec<Prompt> = self
            .prompts
            .iter()
            .filter(|p| p.scenario_id == scenario_id)
            .cloned()
            .collect();

        prompts.sort_by_key(|p| (p.sequence_order.is_none(), p.sequence_order, p.id));

        Ok(prompts)
    }

    async fn prompt(&self, id: i32) -> Result<Option<Prompt>> {
        Ok(self.prompts.iter().find(|p| p.id == id).cloned())
    }
}
