//! Join intent files with their responses and the entity set

use std::sync::Arc;

use serde_json::Value;

use crate::api::{AgentApi, IntentPayload};
use crate::core::error::RequestError;
use crate::source::{EntityFile, IntentFile, ResponsesFile};

/// Everything needed to create or update one intent remotely
#[derive(Debug, Clone)]
pub struct IntentUpdateRequest {
    pub intent: IntentFile,
    pub responses: Option<ResponsesFile>,
    /// Every entity file in the project, shared between requests
    pub entities: Arc<[EntityFile]>,
}

impl IntentUpdateRequest {
    pub fn intent_name(&self) -> &str {
        &self.intent.intent_name
    }

    /// Serialize to the platform's wire format
    pub fn payload(&self) -> Result<IntentPayload, RequestError> {
        IntentPayload::build(&self.intent, self.responses.as_ref(), &self.entities)
    }

    /// Send the create-or-update call, consuming the request
    pub async fn update<A: AgentApi>(self, api: &A) -> Result<Value, RequestError> {
        let payload = self.payload()?;
        api.upsert_intent(&payload).await
    }
}

/// Build one request per intent file, in input order
///
/// Each intent gets the first responses file with the same intent name, if
/// any, and the complete entity set.
pub fn aggregate(
    intent_files: Vec<IntentFile>,
    responses_files: &[ResponsesFile],
    entity_files: Vec<EntityFile>,
) -> Vec<IntentUpdateRequest> {
    let entities: Arc<[EntityFile]> = entity_files.into();
    intent_files
        .into_iter()
        .map(|intent| {
            let responses = responses_files
                .iter()
                .find(|r| r.intent_name == intent.intent_name)
                .cloned();
            IntentUpdateRequest {
                intent,
                responses,
                entities: Arc::clone(&entities),
            }
        })
        .collect()
}
