//! Entity definition files
//!
//! Each item is either a bare value or a value with synonyms. Both go through
//! the expander: the first expansion of `value` is the canonical value, every
//! other expansion becomes a synonym.
//!
//! ```yaml
//! - (red|crimson)
//! - value: blue
//!   synonyms: [navy, (sky|ocean) blue]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{base_name, expander, parse_yaml, syntax_error};
use crate::core::error::Result;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryDocument {
    Bare(String),
    Full {
        value: String,
        #[serde(default)]
        synonyms: Vec<String>,
    },
}

/// A canonical value and everything that should resolve to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEntry {
    pub value: String,
    /// Always starts with `value` itself
    pub synonyms: Vec<String>,
}

/// A parsed `entities/<name>.yml`
#[derive(Debug, Clone)]
pub struct EntityFile {
    pub path: PathBuf,
    /// File stem; the name utterance slots refer to
    pub entity_name: String,
    pub entries: Vec<EntityEntry>,
}

impl EntityFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let documents: Vec<EntryDocument> = if content.trim().is_empty() {
            Vec::new()
        } else {
            parse_yaml(path, &content)?
        };
        Self::from_documents(path, documents)
    }

    fn from_documents(path: &Path, documents: Vec<EntryDocument>) -> Result<Self> {
        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            let (value, extra) = match document {
                EntryDocument::Bare(value) => (value, Vec::new()),
                EntryDocument::Full { value, synonyms } => (value, synonyms),
            };

            let mut synonyms = expander::expand(&value).map_err(|m| syntax_error(path, m))?;
            for synonym in expander::expand_all(&extra).map_err(|m| syntax_error(path, m))? {
                if !synonyms.contains(&synonym) {
                    synonyms.push(synonym);
                }
            }

            // An all-optional line like "(a|)" can expand to nothing usable
            let Some(value) = synonyms.first().cloned() else {
                return Err(syntax_error(path, format!("empty entity value {:?}", value)));
            };
            entries.push(EntityEntry { value, synonyms });
        }

        Ok(Self {
            path: path.to_path_buf(),
            entity_name: base_name(path),
            entries,
        })
    }

    /// Text used for this entity when it fills a slot in a training phrase
    pub fn example_value(&self) -> Option<&str> {
        self.entries.first().map(|e| e.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<EntityFile> {
        let path = Path::new("entities/colors.yml");
        let documents: Vec<EntryDocument> = parse_yaml(path, yaml)?;
        EntityFile::from_documents(path, documents)
    }

    #[test]
    fn test_bare_and_full_entries() {
        let yaml = r#"
- red
- value: blue
  synonyms: [navy]
"#;
        let entity = parse(yaml).unwrap();
        assert_eq!(entity.entity_name, "colors");
        assert_eq!(
            entity.entries,
            vec![
                EntityEntry {
                    value: "red".into(),
                    synonyms: vec!["red".into()]
                },
                EntityEntry {
                    value: "blue".into(),
                    synonyms: vec!["blue".into(), "navy".into()]
                },
            ]
        );
        assert_eq!(entity.example_value(), Some("red"));
    }

    #[test]
    fn test_expanded_value_becomes_synonyms() {
        let entity = parse("- value: (red|crimson)\n  synonyms: [(dark|) red]\n").unwrap();
        assert_eq!(entity.entries[0].value, "red");
        assert_eq!(entity.entries[0].synonyms, vec!["red", "crimson", "dark red"]);
    }

    #[test]
    fn test_empty_expansion_rejected() {
        assert!(parse("- (|)\n").is_err());
    }

    #[test]
    fn test_empty_file_has_no_example_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.yml");
        std::fs::write(&path, "\n").unwrap();
        let entity = EntityFile::read(&path).unwrap();
        assert_eq!(entity.entity_name, "sizes");
        assert_eq!(entity.example_value(), None);
    }
}
