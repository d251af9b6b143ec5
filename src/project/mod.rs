//! New project scaffolding

use std::path::{Path, PathBuf};

use crate::core::config::CONFIG_FILE_NAME;
use crate::core::error::Result;

const CONFIG_TEMPLATE: &str = r#"# intent-sync project configuration
#
# Directories are relative to this file. The API token is read from the
# INTENT_SYNC_API_TOKEN environment variable and never from this file.

intents_dir = "intents"
responses_dir = "responses"
entities_dir = "entities"

[api]
base_url = "https://api.api.ai/v1"
# api_version = "20150910"
"#;

const INTENT_TEMPLATE: &str = r#"# Training phrases. (a|b) expands to both alternatives, {entity:alias}
# marks a slot filled from entities/<entity>.yml.
utterances:
  - (hi|hello) (there|)
  - my favorite color is {colors:color}
"#;

const RESPONSES_TEMPLATE: &str = r#"- (Hi|Hello)!
- Good to see you.
"#;

const ENTITY_TEMPLATE: &str = r#"- red
- value: blue
  synonyms: [navy, (sky|ocean) blue]
"#;

/// Files written by [`init`], relative to the project root
const TEMPLATE_FILES: &[(&str, &str)] = &[
    (CONFIG_FILE_NAME, CONFIG_TEMPLATE),
    ("intents/greeting.yml", INTENT_TEMPLATE),
    ("responses/greeting.yml", RESPONSES_TEMPLATE),
    ("entities/colors.yml", ENTITY_TEMPLATE),
];

/// Create the project layout and sample files under `root`
///
/// Existing files are left untouched. Returns the files that were created.
pub fn init(root: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in ["intents", "responses", "entities"] {
        std::fs::create_dir_all(root.join(dir))?;
    }
    for (relative, contents) in TEMPLATE_FILES {
        let path = root.join(relative);
        if path.exists() {
            tracing::debug!(path = %path.display(), "keeping existing file");
            continue;
        }
        std::fs::write(&path, contents)?;
        created.push(path);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::FileCollector;
    use crate::core::config::ProjectConfig;

    #[test]
    fn test_init_creates_loadable_project() {
        let dir = tempfile::tempdir().unwrap();
        let created = init(dir.path()).unwrap();
        assert_eq!(created.len(), TEMPLATE_FILES.len());

        let config = ProjectConfig::load_file(dir.path()).unwrap();
        let collector = FileCollector::new(&config);
        let intents = collector.intent_files::<&str>(&[]).unwrap();
        let entities = collector.entity_files::<&str>(&[]).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].utterances.len(), 5);
        assert_eq!(entities[0].entries[1].synonyms.len(), 4);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("intents")).unwrap();
        std::fs::write(dir.path().join("intents/greeting.yml"), "utterances: [yo]\n").unwrap();

        let created = init(dir.path()).unwrap();
        assert_eq!(created.len(), TEMPLATE_FILES.len() - 1);
        let kept = std::fs::read_to_string(dir.path().join("intents/greeting.yml")).unwrap();
        assert_eq!(kept, "utterances: [yo]\n");
    }
}
