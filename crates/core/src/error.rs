/// Errors raised by the spot storage layer.
///
/// Every variant renders a human-readable message; the API layer forwards that
/// message to clients unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to decode JSON data: {0}")]
    Decode(serde_json::Error),
    #[error("failed to read data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to create data directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
}

impl StorageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
