//! Project configuration
//!
//! Directory layout comes from an optional `intent-sync.toml` in the project
//! root; API settings can be overridden from the environment. The API token is
//! only ever read from the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{Result, SyncError};

/// Name of the optional config file in the project root
pub const CONFIG_FILE_NAME: &str = "intent-sync.toml";

pub const ENV_API_TOKEN: &str = "INTENT_SYNC_API_TOKEN";
pub const ENV_API_URL: &str = "INTENT_SYNC_API_URL";
pub const ENV_API_VERSION: &str = "INTENT_SYNC_API_VERSION";

const DEFAULT_BASE_URL: &str = "https://api.api.ai/v1";

/// Resolved configuration for one project directory
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Project root all relative directories are resolved against
    pub root: PathBuf,
    /// Required directory of intent source files
    pub intents_dir: PathBuf,
    /// Optional directory of response source files
    pub responses_dir: PathBuf,
    /// Required directory of entity source files
    pub entities_dir: PathBuf,
    pub api: ApiConfig,
}

/// Remote platform settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash (e.g. `https://api.api.ai/v1`)
    pub base_url: String,
    /// Protocol version sent as the `v` query parameter
    pub api_version: Option<String>,
    /// Bearer token. Never read from the config file.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_version: None,
            token: None,
        }
    }
}

impl ApiConfig {
    /// Apply `INTENT_SYNC_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.base_url = url;
        }
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            self.api_version = Some(version);
        }
        self.token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
    }

    /// The token, or a config error explaining how to set it
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| SyncError::ConfigError(format!("{} not set", ENV_API_TOKEN)))
    }
}

/// On-disk shape of `intent-sync.toml`
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigFile {
    intents_dir: PathBuf,
    responses_dir: PathBuf,
    entities_dir: PathBuf,
    api: ApiConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            intents_dir: "intents".into(),
            responses_dir: "responses".into(),
            entities_dir: "entities".into(),
            api: ApiConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Default layout rooted at `root`, without reading files or environment
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_file_contents(root.into(), ConfigFile::default())
    }

    /// Load `intent-sync.toml` from `root` if present, then apply environment overrides
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::load_file(root)?;
        config.api.apply_env();
        Ok(config)
    }

    /// Load `intent-sync.toml` from `root` if present, ignoring the environment
    pub fn load_file(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        let file = if path.is_file() {
            let content = std::fs::read_to_string(&path)?;
            Self::parse_toml(&content)?
        } else {
            ConfigFile::default()
        };
        Ok(Self::from_file_contents(root.to_path_buf(), file))
    }

    fn parse_toml(content: &str) -> Result<ConfigFile> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file)
    }

    fn from_file_contents(root: PathBuf, file: ConfigFile) -> Self {
        let mut api = file.api;
        api.base_url = api.base_url.trim_end_matches('/').to_string();
        Self {
            intents_dir: root.join(file.intents_dir),
            responses_dir: root.join(file.responses_dir),
            entities_dir: root.join(file.entities_dir),
            api,
            root,
        }
    }
}
