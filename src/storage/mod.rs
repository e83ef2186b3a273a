//! Token persistence.
//!
//! The client persists exactly two values: the access token and the refresh
//! token, keyed as `access_token` and `refresh_token`. [`TokenStore`] is the
//! seam; [`MemoryTokenStore`] backs tests and short-lived tools, while
//! [`FileTokenStore`] keeps a small JSON file on disk.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Token store is poisoned")]
    Poisoned,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage for the session's token pair.
pub trait TokenStore: Send + Sync {
    fn get_access(&self) -> Result<Option<String>, StoreError>;
    fn get_refresh(&self) -> Result<Option<String>, StoreError>;
    /// Replace only the access token (after a refresh).
    fn set_access(&self, access: &str) -> Result<(), StoreError>;
    /// Store both tokens (after a login).
    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), StoreError>;
    /// Remove both tokens (logout, failed refresh).
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "access_token", skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(rename = "refresh_token", skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_access(&self) -> Result<Option<String>, StoreError> {
        let tokens = self.tokens.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(tokens.access.clone())
    }

    fn get_refresh(&self) -> Result<Option<String>, StoreError> {
        let tokens = self.tokens.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(tokens.refresh.clone())
    }

    fn set_access(&self, access: &str) -> Result<(), StoreError> {
        let mut tokens = self.tokens.lock().map_err(|_| StoreError::Poisoned)?;
        tokens.access = Some(access.to_string());
        Ok(())
    }

    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), StoreError> {
        let mut tokens = self.tokens.lock().map_err(|_| StoreError::Poisoned)?;
        tokens.access = Some(access.to_string());
        tokens.refresh = Some(refresh.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut tokens = self.tokens.lock().map_err(|_| StoreError::Poisoned)?;
        *tokens = StoredTokens::default();
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// JSON file store. Writes go through a temp file and rename so a crash
/// mid-write never leaves a truncated token file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<StoredTokens, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, tokens: &StoredTokens) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(tokens)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get_access(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.access)
    }

    fn get_refresh(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.refresh)
    }

    fn set_access(&self, access: &str) -> Result<(), StoreError> {
        let mut tokens = self.read()?;
        tokens.access = Some(access.to_string());
        self.write(&tokens)
    }

    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), StoreError> {
        self.write(&StoredTokens {
            access: Some(access.to_string()),
            refresh: Some(refresh.to_string()),
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
