//! Durable session snapshot.
//!
//! The only state that survives a process restart is a JSON snapshot of
//! the active session's [`User`] record, written on login/signup/profile
//! updates and removed on logout. It stands in for the browser's
//! local-storage "user" key.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, StoreError};
use crate::models::User;

/// Handle to the on-disk session snapshot.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Place the snapshot in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/hustlr/session.json`
    /// - macOS:   `~/Library/Application Support/com.hustlr.hustlr/session.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\hustlr\hustlr\data\session.json`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "hustlr", "hustlr").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self::open_at(&data_dir.join("session.json")))
    }

    /// Use an explicit snapshot path.
    ///
    /// Useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the saved session, if any.
    ///
    /// A snapshot that fails to parse is discarded, matching the original
    /// behaviour of dropping a corrupt local-storage entry.
    pub fn load(&self) -> Result<Option<User>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session snapshot");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Write (or overwrite) the snapshot for the given user.
    pub fn save(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the snapshot. Succeeds if none exists.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
