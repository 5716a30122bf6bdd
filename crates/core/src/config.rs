//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the store. Request handlers never read process-wide environment variables, which
//! keeps behaviour consistent across multi-threaded runtimes and test harnesses.

use crate::constants::DEFAULT_DATA_FILE;
use crate::{StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data file does not need to exist yet; it is created on the first write. The path
    /// must not point at an existing directory.
    pub fn new(data_file: PathBuf) -> StorageResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(StorageError::validation("data file path cannot be empty"));
        }

        if data_file.is_dir() {
            return Err(StorageError::validation(format!(
                "data file path is a directory: {}",
                data_file.display()
            )));
        }

        Ok(Self { data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Directory that holds the data file, if the path has one.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

/// Resolve the data file path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_FILE`].
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
