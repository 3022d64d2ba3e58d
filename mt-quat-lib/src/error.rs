use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a whole run before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{0}' is not an existing directory")]
    NotADirectory(PathBuf),
    #[error("'{0}' is not a regular file")]
    FileNotFound(PathBuf),
}
