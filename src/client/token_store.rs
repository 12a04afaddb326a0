//! Persistent bearer token storage
//!
//! Keeps the token issued at login in a small file so later invocations can
//! build an authenticated `Session`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Session;

/// File-backed token storage
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

/// Token storage errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Failed to read token file {path:?}: {error}")]
    Read { path: PathBuf, error: String },

    #[error("Failed to write token file {path:?}: {error}")]
    Write { path: PathBuf, error: String },
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, if any
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok(if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                error: e.to_string(),
            }),
        }
    }

    /// Session for the stored token (anonymous when none is stored)
    pub fn session(&self) -> Result<Session, TokenStoreError> {
        Ok(Session::from_token(self.load()?))
    }

    /// Store a token, replacing any previous one
    pub fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let write_err = |e: std::io::Error| TokenStoreError::Write {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, token).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        tracing::debug!(path = ?self.path, "Stored access token");
        Ok(())
    }

    /// Forget the stored token. Succeeds when nothing is stored.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Write {
                path: self.path.clone(),
                error: e.to_string(),
            }),
        }
    }
}
