//! Stored OAuth token persistence.
//!
//! The stored token is an opaque blob: created once after a successful
//! interactive authorization, read on every subsequent OAuth authorization,
//! and never refreshed or invalidated by this system. Token lifecycle is
//! delegated to the provider.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CalendarError, CalendarResult};

/// The persisted result of a successful OAuth authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token, stored as part of the opaque blob.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// When the authorization exchange completed.
    pub obtained_at: DateTime<Utc>,
}

impl TokenInfo {
    /// Creates a token record from an exchange response.
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            obtained_at: Utc::now(),
        }
    }
}

/// File-backed token storage at a well-known path.
#[derive(Debug)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Creates a token storage at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the stored token, if one exists.
    pub fn load(&self) -> CalendarResult<Option<TokenInfo>> {
        if !self.path.exists() {
            debug!("no token file at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            CalendarError::configuration(format!("failed to read token file: {}", e))
        })?;

        let token: TokenInfo = serde_json::from_str(&content).map_err(|e| {
            CalendarError::configuration(format!("failed to parse token file: {}", e))
        })?;

        info!("loaded stored token from {:?}", self.path);
        Ok(Some(token))
    }

    /// Saves a token to disk, replacing any existing one.
    pub fn save(&self, token: &TokenInfo) -> CalendarResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CalendarError::configuration(format!("failed to create token directory: {}", e))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(token)
            .map_err(|e| CalendarError::internal(format!("failed to serialize token: {}", e)))?;

        fs::write(&temp_path, &content).map_err(|e| {
            CalendarError::configuration(format!("failed to write token file: {}", e))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            CalendarError::configuration(format!("failed to rename token file: {}", e))
        })?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        info!("stored token at {:?}", self.path);
        Ok(())
    }

    /// Removes the stored token, if present.
    pub fn clear(&self) -> CalendarResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                CalendarError::configuration(format!("failed to remove token file: {}", e))
            })?;
            info!("cleared stored token at {:?}", self.path);
        }
        Ok(())
    }

    /// Returns true if a token file exists at the storage path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns the token storage path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> TokenStorage {
        TokenStorage::new(dir.path().join("token.json"))
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let token = TokenInfo::new("access-token", Some("refresh-token".to_string()));
        storage.save(&token).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-token");
        assert_eq!(loaded.refresh_token, Some("refresh-token".to_string()));
    }

    #[test]
    fn load_without_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "not json").unwrap();
        assert!(storage.load().is_err());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("nested").join("token.json"));
        storage.save(&TokenInfo::new("access", None)).unwrap();
        assert!(storage.exists());
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        storage.save(&TokenInfo::new("access", None)).unwrap();
        assert!(storage.exists());

        storage.clear().unwrap();
        assert!(!storage.exists());
        // Clearing again is a no-op.
        storage.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.save(&TokenInfo::new("access", None)).unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
