//! Durable client-side token storage
//!
//! The cached token pair survives process restarts so a client can resume
//! its session without logging in again.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::ClientError;

/// The cached token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Durable storage for the current token pair
pub trait TokenStore: Send + Sync {
    /// Load the cached tokens, if any
    fn load(&self) -> Result<Option<StoredTokens>, ClientError>;

    /// Replace the cached tokens
    fn save(&self, tokens: &StoredTokens) -> Result<(), ClientError>;

    /// Drop the cached tokens
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store backed by a JSON file
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let tokens = serde_json::from_str(&contents)
                    .map_err(|e| ClientError::Storage(format!("Corrupt token file: {}", e)))?;
                Ok(Some(tokens))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!("Failed to read tokens: {}", e))),
        }
    }

    fn save(&self, tokens: &StoredTokens) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("Failed to create dir: {}", e)))?;
        }
        let contents = serde_json::to_string_pretty(tokens)
            .map_err(|e| ClientError::Storage(format!("Failed to encode tokens: {}", e)))?;
        fs::write(&self.path, contents)
            .map_err(|e| ClientError::Storage(format!("Failed to write tokens: {}", e)))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!("Failed to clear tokens: {}", e))),
        }
    }
}

/// In-memory token store for tests and short-lived processes
pub struct MemoryTokenStore {
    inner: Mutex<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, ClientError> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn save(&self, tokens: &StoredTokens) -> Result<(), ClientError> {
        *self.inner.lock().unwrap() = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.inner.lock().unwrap() = None;
        Ok(())
    }
}
