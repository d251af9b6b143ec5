use std::path::{Path, PathBuf};

use super::{base_name, expander, parse_yaml, syntax_error};
use crate::core::error::Result;

/// A parsed `responses/<name>.yml`: a YAML list of response lines
#[derive(Debug, Clone)]
pub struct ResponsesFile {
    pub path: PathBuf,
    /// File stem, matched against `IntentFile::intent_name`
    pub intent_name: String,
    /// Expanded response variants
    pub responses: Vec<String>,
}

impl ResponsesFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Self::from_lines(path, &[]);
        }
        let lines: Vec<String> = parse_yaml(path, &content)?;
        Self::from_lines(path, &lines)
    }

    fn from_lines(path: &Path, lines: &[String]) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            intent_name: base_name(path),
            responses: expander::expand_all(lines).map_err(|m| syntax_error(path, m))?,
        })
    }
}
