//! Per-role session storage state
//!
//! A setup phase logs in once per role and saves the browser's storage
//! state (cookies) to `<session-dir>/<role>.json`; every test needing
//! that role's authenticated session reads the file instead of logging
//! in again. Files are removed at global teardown.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use casework_common::types::Role;

use crate::error::{E2eError, E2eResult};

/// One browser cookie, in the shape browser automation tools emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

/// Saved authenticated session for one role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageState {
    pub cookies: Vec<Cookie>,
}

/// File-backed store of per-role storage states.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, role: Role) -> PathBuf {
        self.dir.join(format!("{}.json", role.as_str()))
    }

    /// Write a role's session, overwriting any previous one.
    pub fn save(&self, role: Role, state: &StorageState) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(role);
        std::fs::write(&path, serde_json::to_string_pretty(state)?)?;
        debug!(role = role.as_str(), path = %path.display(), "session state saved");
        Ok(path)
    }

    pub fn load(&self, role: Role) -> E2eResult<StorageState> {
        let path = self.path_for(role);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            E2eError::SessionState(format!(
                "no saved session for {} at {}: {e}",
                role.label(),
                path.display()
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn exists(&self, role: Role) -> bool {
        self.path_for(role).exists()
    }

    /// Global-teardown cleanup of every saved session.
    pub fn remove_all(&self) -> E2eResult<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let mut removed = 0;
        for role in Role::all() {
            let path = self.path_for(*role);
            if path.exists() {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        info!(removed, dir = %self.dir.display(), "session states removed");
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
