//! Batch create-or-update workflows
//!
//! Collection errors abort a run before anything is sent. Once requests are
//! going out, each object gets its own result slot and a failure never stops
//! the objects after it.

use serde_json::Value;

use super::aggregate::aggregate;
use crate::api::{AgentApi, EntityPayload};
use crate::collect::FileCollector;
use crate::core::config::ProjectConfig;
use crate::core::error::{RequestError, Result};

/// Result of one remote create-or-update attempt
#[derive(Debug)]
pub struct UpdateOutcome {
    /// Intent or entity name
    pub name: String,
    pub result: std::result::Result<Value, RequestError>,
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Number of failed outcomes in a batch
pub fn failure_count(outcomes: &[UpdateOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.is_success()).count()
}

/// Pushes intents from a project directory to the platform
pub struct IntentUpdater<'a, A> {
    config: &'a ProjectConfig,
    api: &'a A,
}

impl<'a, A: AgentApi> IntentUpdater<'a, A> {
    pub fn new(config: &'a ProjectConfig, api: &'a A) -> Self {
        Self { config, api }
    }

    /// Update every intent named in `names`, or all intents when empty
    ///
    /// Names without an intent file are skipped without a result entry.
    pub async fn update_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<UpdateOutcome>> {
        let collector = FileCollector::new(self.config);
        let intent_files = collector.intent_files(names)?;
        let responses_files = collector.responses_files(names)?;
        let entity_files = collector.entity_files::<&str>(&[])?;

        let requests = aggregate(intent_files, &responses_files, entity_files);
        tracing::info!(count = requests.len(), "updating intents");

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let name = request.intent_name().to_string();
            let result = request.update(self.api).await;
            log_result("intent", &name, &result);
            outcomes.push(UpdateOutcome { name, result });
        }
        Ok(outcomes)
    }
}

/// Pushes entities from a project directory to the platform
pub struct EntityUpdater<'a, A> {
    config: &'a ProjectConfig,
    api: &'a A,
}

impl<'a, A: AgentApi> EntityUpdater<'a, A> {
    pub fn new(config: &'a ProjectConfig, api: &'a A) -> Self {
        Self { config, api }
    }

    /// Update every entity named in `names`, or all entities when empty
    pub async fn update_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<UpdateOutcome>> {
        let entity_files = FileCollector::new(self.config).entity_files(names)?;
        tracing::info!(count = entity_files.len(), "updating entities");

        let mut outcomes = Vec::with_capacity(entity_files.len());
        for entity in &entity_files {
            let payload = EntityPayload::build(entity);
            let result = self.api.upsert_entity(&payload).await;
            log_result("entity", &entity.entity_name, &result);
            outcomes.push(UpdateOutcome {
                name: entity.entity_name.clone(),
                result,
            });
        }
        Ok(outcomes)
    }
}

fn log_result(kind: &str, name: &str, result: &std::result::Result<Value, RequestError>) {
    match result {
        Ok(_) => tracing::info!(kind, name, "updated"),
        Err(e) => tracing::warn!(kind, name, error = %e, "update failed"),
    }
}
