//! Intent definition files
//!
//! ```yaml
//! action: say_hello        # optional, defaults to the intent name
//! contexts: [onboarding]   # optional input contexts
//! priority: 500000         # optional
//! webhook: false           # optional
//! utterances:
//!   - (hi|hello) there
//!   - my favorite color is {colors:color}
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::expander::{self, Segment};
use super::{base_name, read_yaml, syntax_error};
use crate::core::error::Result;

/// Default platform priority for an intent ("normal")
pub const DEFAULT_PRIORITY: u32 = 500_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IntentDocument {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    contexts: Vec<String>,
    #[serde(default)]
    priority: Option<u32>,
    #[serde(default)]
    webhook: bool,
    #[serde(default)]
    utterances: Vec<String>,
}

/// One expanded training phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Expanded text, slots still in `{entity:alias}` form
    pub text: String,
    pub segments: Vec<Segment>,
}

impl Utterance {
    /// Entity slots in order of appearance
    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot { entity, alias } => Some((entity.as_str(), alias.as_str())),
            Segment::Text(_) => None,
        })
    }
}

/// A parsed `intents/<name>.yml`
#[derive(Debug, Clone)]
pub struct IntentFile {
    pub path: PathBuf,
    /// File stem; the key responses files are matched on
    pub intent_name: String,
    pub action: String,
    pub contexts: Vec<String>,
    pub priority: u32,
    pub webhook: bool,
    /// Lines as written, before expansion
    pub source_utterances: Vec<String>,
    pub utterances: Vec<Utterance>,
}

impl IntentFile {
    pub fn read(path: &Path) -> Result<Self> {
        let document: IntentDocument = read_yaml(path)?;
        Self::from_document(path, document)
    }

    fn from_document(path: &Path, document: IntentDocument) -> Result<Self> {
        let intent_name = base_name(path);

        let mut utterances = Vec::new();
        for text in expander::expand_all(&document.utterances).map_err(|m| syntax_error(path, m))? {
            let segments = expander::parse_annotations(&text).map_err(|m| syntax_error(path, m))?;
            utterances.push(Utterance { text, segments });
        }

        Ok(Self {
            path: path.to_path_buf(),
            action: document.action.unwrap_or_else(|| intent_name.clone()),
            intent_name,
            contexts: document.contexts,
            priority: document.priority.unwrap_or(DEFAULT_PRIORITY),
            webhook: document.webhook,
            source_utterances: document.utterances,
            utterances,
        })
    }

    /// Expanded utterance texts, in order
    pub fn expanded_utterances(&self) -> impl Iterator<Item = &str> {
        self.utterances.iter().map(|u| u.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_yaml;

    fn parse(path: &str, yaml: &str) -> Result<IntentFile> {
        let path = Path::new(path);
        let document: IntentDocument = parse_yaml(path, yaml)?;
        IntentFile::from_document(path, document)
    }

    #[test]
    fn test_defaults_from_file_name() {
        let intent = parse("intents/greeting.yml", "utterances: [hello]").unwrap();
        assert_eq!(intent.intent_name, "greeting");
        assert_eq!(intent.action, "greeting");
        assert_eq!(intent.priority, DEFAULT_PRIORITY);
        assert!(!intent.webhook);
        assert!(intent.contexts.is_empty());
    }

    #[test]
    fn test_utterances_are_expanded_and_annotated() {
        let yaml = r#"
action: pick_color
contexts: [shop]
utterances:
  - (I like|give me) {colors:color}
"#;
        let intent = parse("intents/favorite.yml", yaml).unwrap();
        assert_eq!(intent.action, "pick_color");
        assert_eq!(intent.contexts, vec!["shop"]);
        let texts: Vec<_> = intent.expanded_utterances().collect();
        assert_eq!(texts, vec!["I like {colors:color}", "give me {colors:color}"]);
        let slots: Vec<_> = intent.utterances[0].slots().collect();
        assert_eq!(slots, vec![("colors", "color")]);
        assert_eq!(intent.source_utterances.len(), 1);
    }

    #[test]
    fn test_syntax_error_is_reported_with_path() {
        let err = parse("intents/broken.yml", "utterances: ['(hi|hello']").unwrap_err();
        assert!(err.to_string().contains("intents/broken.yml"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse("intents/x.yml", "utterance: [hi]").is_err());
    }

    #[test]
    fn test_empty_document_has_no_utterances() {
        let intent = parse("intents/empty.yml", "{}").unwrap();
        assert!(intent.utterances.is_empty());
    }
}
