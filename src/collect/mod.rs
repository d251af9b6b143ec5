//! Collect source files from the project directories
//!
//! Listings keep the order the file system returns them in. A name filter only
//! ever removes entries: a requested name with no file is silently ignored.

use std::path::{Path, PathBuf};

use crate::core::config::ProjectConfig;
use crate::core::error::Result;
use crate::source::{base_name, EntityFile, IntentFile, ResponsesFile, SourceFile, SourceKind};

/// List the files directly inside `dir`, in raw listing order
///
/// Subdirectories are skipped. A missing directory is an error.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        entries.push(entry.path());
    }
    Ok(entries)
}

/// Keep only paths whose base name is in `names`; an empty `names` keeps all
pub fn filter_by_names<S: AsRef<str>>(paths: Vec<PathBuf>, names: &[S]) -> Vec<PathBuf> {
    if names.is_empty() {
        return paths;
    }
    paths
        .into_iter()
        .filter(|path| {
            let stem = base_name(path);
            names.iter().any(|name| name.as_ref() == stem)
        })
        .collect()
}

/// List `dir` and apply the name filter
pub fn collect<S: AsRef<str>>(dir: &Path, names: &[S]) -> Result<Vec<PathBuf>> {
    Ok(filter_by_names(list_entries(dir)?, names))
}

/// Collect and construct one reader per surviving path
pub fn collect_files<T, S, F>(dir: &Path, names: &[S], read: F) -> Result<Vec<T>>
where
    S: AsRef<str>,
    F: Fn(&Path) -> Result<T>,
{
    collect(dir, names)?
        .iter()
        .map(|path| read(path.as_path()))
        .collect()
}

/// Collector bound to one project's directory layout
pub struct FileCollector<'a> {
    config: &'a ProjectConfig,
}

impl<'a> FileCollector<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    /// Directory files of `kind` live in
    pub fn dir_for(&self, kind: SourceKind) -> &'a Path {
        match kind {
            SourceKind::Intent => &self.config.intents_dir,
            SourceKind::Responses => &self.config.responses_dir,
            SourceKind::Entity => &self.config.entities_dir,
        }
    }

    /// Read every file of type `T` matching `names`
    ///
    /// A missing directory is an error unless the kind is optional, in which
    /// case there are simply no files.
    pub fn files<T: SourceFile, S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<T>> {
        let dir = self.dir_for(T::KIND);
        if T::KIND.is_optional() && !dir.is_dir() {
            tracing::debug!(kind = T::KIND.label(), dir = %dir.display(), "no directory");
            return Ok(Vec::new());
        }
        let files = collect_files(dir, names, T::read)?;
        tracing::debug!(
            kind = T::KIND.label(),
            count = files.len(),
            dir = %dir.display(),
            "collected source files"
        );
        Ok(files)
    }

    pub fn intent_files<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<IntentFile>> {
        self.files(names)
    }

    pub fn responses_files<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ResponsesFile>> {
        self.files(names)
    }

    pub fn entity_files<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<EntityFile>> {
        self.files(names)
    }
}
