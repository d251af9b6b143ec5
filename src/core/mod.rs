pub mod config;
pub mod error;

pub use config::{ApiConfig, ProjectConfig};
pub use error::{RequestError, Result, SyncError};
