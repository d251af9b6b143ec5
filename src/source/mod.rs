//! Source file readers
//!
//! A project is a flat set of YAML files in three directories. The file stem is
//! the identifier: `intents/greeting.yml` and `responses/greeting.yml` both
//! belong to the intent `greeting`, `entities/colors.yml` defines the entity
//! `colors`.

pub mod entity_file;
pub mod expander;
pub mod intent_file;
pub mod responses_file;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::error::{Result, SyncError};

pub use entity_file::{EntityEntry, EntityFile};
pub use expander::Segment;
pub use intent_file::{IntentFile, Utterance};
pub use responses_file::ResponsesFile;

/// Which directory a source file is collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Intent,
    Responses,
    Entity,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Intent => "intent",
            SourceKind::Responses => "responses",
            SourceKind::Entity => "entity",
        }
    }

    /// Whether a missing directory of this kind just means "no files"
    pub fn is_optional(&self) -> bool {
        matches!(self, SourceKind::Responses)
    }
}

/// A source file reader the collector can construct from a path
pub trait SourceFile: Sized {
    const KIND: SourceKind;

    /// Read and parse `path`
    fn read(path: &Path) -> Result<Self>;

    /// Intent or entity name this file defines
    fn name(&self) -> &str;

    fn path(&self) -> &Path;
}

impl SourceFile for IntentFile {
    const KIND: SourceKind = SourceKind::Intent;

    fn read(path: &Path) -> Result<Self> {
        IntentFile::read(path)
    }

    fn name(&self) -> &str {
        &self.intent_name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceFile for ResponsesFile {
    const KIND: SourceKind = SourceKind::Responses;

    fn read(path: &Path) -> Result<Self> {
        ResponsesFile::read(path)
    }

    fn name(&self) -> &str {
        &self.intent_name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceFile for EntityFile {
    const KIND: SourceKind = SourceKind::Entity;

    fn read(path: &Path) -> Result<Self> {
        EntityFile::read(path)
    }

    fn name(&self) -> &str {
        &self.entity_name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// File name with its last extension stripped
///
/// `greeting.yml` -> `greeting`, `my.intent.yml` -> `my.intent`
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read `path` and deserialize it as YAML, attaching the path to any error
fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(path, &content)
}

fn parse_yaml<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_yaml::from_str(content).map_err(|source| SyncError::YamlError {
        path: PathBuf::from(path),
        source,
    })
}

fn syntax_error(path: &Path, message: String) -> SyncError {
    SyncError::SyntaxError {
        path: PathBuf::from(path),
        message,
    }
}
