//! Wire format for the platform's intent and entity endpoints

use serde::Serialize;

use crate::core::error::RequestError;
use crate::source::{EntityFile, IntentFile, ResponsesFile, Segment};

/// Speech message type in the platform's message list
const MESSAGE_TYPE_SPEECH: u8 = 0;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentPayload {
    pub name: String,
    pub auto: bool,
    pub contexts: Vec<String>,
    pub priority: u32,
    pub webhook_used: bool,
    pub user_says: Vec<UserSays>,
    pub responses: Vec<IntentResponse>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSays {
    pub data: Vec<UserSaysPart>,
    pub is_template: bool,
    pub count: u32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSaysPart {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined: Option<bool>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub action: String,
    pub reset_contexts: bool,
    pub affected_contexts: Vec<String>,
    pub parameters: Vec<IntentParameter>,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentParameter {
    pub name: String,
    pub data_type: String,
    pub value: String,
    pub is_list: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: u8,
    pub speech: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EntityPayload {
    pub name: String,
    pub entries: Vec<EntityEntryPayload>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EntityEntryPayload {
    pub value: String,
    pub synonyms: Vec<String>,
}

impl IntentPayload {
    /// Build the payload for one intent
    ///
    /// Slots are filled with the referenced entity's first value, so every
    /// referenced entity must be among `entities` and have at least one entry.
    pub fn build(
        intent: &IntentFile,
        responses: Option<&ResponsesFile>,
        entities: &[EntityFile],
    ) -> Result<Self, RequestError> {
        let mut parameters: Vec<IntentParameter> = Vec::new();
        let mut user_says = Vec::with_capacity(intent.utterances.len());

        for utterance in &intent.utterances {
            let mut data = Vec::with_capacity(utterance.segments.len());
            for segment in &utterance.segments {
                match segment {
                    Segment::Text(text) => data.push(UserSaysPart {
                        text: text.clone(),
                        alias: None,
                        meta: None,
                        user_defined: None,
                    }),
                    Segment::Slot { entity, alias } => {
                        let example = example_value(entities, entity, &intent.intent_name)?;
                        data.push(UserSaysPart {
                            text: example.to_string(),
                            alias: Some(alias.clone()),
                            meta: Some(format!("@{}", entity)),
                            user_defined: Some(true),
                        });
                        if !parameters.iter().any(|p| &p.name == alias) {
                            parameters.push(IntentParameter {
                                name: alias.clone(),
                                data_type: format!("@{}", entity),
                                value: format!("${}", alias),
                                is_list: false,
                            });
                        }
                    }
                }
            }
            user_says.push(UserSays {
                data,
                is_template: false,
                count: 0,
            });
        }

        let messages = match responses {
            Some(file) if !file.responses.is_empty() => vec![Message {
                kind: MESSAGE_TYPE_SPEECH,
                speech: file.responses.clone(),
            }],
            _ => Vec::new(),
        };

        Ok(Self {
            name: intent.intent_name.clone(),
            auto: true,
            contexts: intent.contexts.clone(),
            priority: intent.priority,
            webhook_used: intent.webhook,
            user_says,
            responses: vec![IntentResponse {
                action: intent.action.clone(),
                reset_contexts: false,
                affected_contexts: Vec::new(),
                parameters,
                messages,
            }],
        })
    }
}

impl EntityPayload {
    pub fn build(entity: &EntityFile) -> Self {
        Self {
            name: entity.entity_name.clone(),
            entries: entity
                .entries
                .iter()
                .map(|e| EntityEntryPayload {
                    value: e.value.clone(),
                    synonyms: e.synonyms.clone(),
                })
                .collect(),
        }
    }
}

fn example_value<'e>(
    entities: &'e [EntityFile],
    entity: &str,
    intent_name: &str,
) -> Result<&'e str, RequestError> {
    let file = entities
        .iter()
        .find(|e| e.entity_name == entity)
        .ok_or_else(|| {
            RequestError::Payload(format!(
                "intent '{}' references unknown entity '{}'",
                intent_name, entity
            ))
        })?;
    file.example_value().ok_or_else(|| {
        RequestError::Payload(format!("entity '{}' has no values", entity))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{EntityEntry, Utterance};
    use crate::source::expander::parse_annotations;
    use std::path::PathBuf;

    fn intent(name: &str, lines: &[&str]) -> IntentFile {
        IntentFile {
            path: PathBuf::from(format!("intents/{}.yml", name)),
            intent_name: name.into(),
            action: name.into(),
            contexts: Vec::new(),
            priority: 500_000,
            webhook: false,
            source_utterances: lines.iter().map(|l| l.to_string()).collect(),
            utterances: lines
                .iter()
                .map(|l| Utterance {
                    text: l.to_string(),
                    segments: parse_annotations(l).unwrap(),
                })
                .collect(),
        }
    }

    fn colors() -> EntityFile {
        EntityFile {
            path: PathBuf::from("entities/colors.yml"),
            entity_name: "colors".into(),
            entries: vec![EntityEntry {
                value: "red".into(),
                synonyms: vec!["red".into(), "crimson".into()],
            }],
        }
    }

    #[test]
    fn test_slots_become_parameters_once() {
        let intent = intent("paint", &["paint it {colors:color}", "{colors:color} please"]);
        let payload = IntentPayload::build(&intent, None, &[colors()]).unwrap();

        assert_eq!(payload.user_says.len(), 2);
        assert_eq!(payload.user_says[0].data[1].text, "red");
        assert_eq!(payload.user_says[0].data[1].meta.as_deref(), Some("@colors"));
        let params = &payload.responses[0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "color");
        assert_eq!(params[0].value, "$color");
        assert!(payload.responses[0].messages.is_empty());
    }

    #[test]
    fn test_unknown_entity_is_payload_error() {
        let intent = intent("size", &["make it {sizes}"]);
        let err = IntentPayload::build(&intent, None, &[colors()]).unwrap_err();
        assert!(matches!(err, RequestError::Payload(_)));
        assert!(err.to_string().contains("sizes"));
    }

    #[test]
    fn test_responses_become_speech_message() {
        let intent = intent("greeting", &["hello"]);
        let responses = ResponsesFile {
            path: PathBuf::from("responses/greeting.yml"),
            intent_name: "greeting".into(),
            responses: vec!["Hi!".into(), "Hey!".into()],
        };
        let payload = IntentPayload::build(&intent, Some(&responses), &[]).unwrap();
        assert_eq!(
            payload.responses[0].messages,
            vec![Message {
                kind: 0,
                speech: vec!["Hi!".into(), "Hey!".into()]
            }]
        );
    }

    #[test]
    fn test_wire_field_names() {
        let intent = intent("greeting", &["hi {colors}"]);
        let payload = IntentPayload::build(&intent, None, &[colors()]).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["name"], "greeting");
        assert_eq!(json["webhookUsed"], false);
        assert_eq!(json["userSays"][0]["isTemplate"], false);
        assert_eq!(json["userSays"][0]["data"][0], serde_json::json!({"text": "hi "}));
        assert_eq!(json["userSays"][0]["data"][1]["userDefined"], true);
        assert_eq!(json["responses"][0]["parameters"][0]["dataType"], "@colors");
    }

    #[test]
    fn test_entity_payload() {
        let json = serde_json::to_value(EntityPayload::build(&colors())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "colors",
                "entries": [{"value": "red", "synonyms": ["red", "crimson"]}]
            })
        );
    }
}
