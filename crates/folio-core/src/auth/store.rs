use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Persistence for the single bearer token.
///
/// Implementations hold at most one token under a fixed key and do not
/// inspect its contents.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, token: &str) -> Result<()>;
    /// Remove the token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// Token persisted as JSON in `<dir>/session.json`.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Load the full record, including when it was saved
    pub fn load(&self) -> Result<Option<StoredToken>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .context("Failed to read session file")?;
        let stored: StoredToken = serde_json::from_str(&contents)
            .context("Failed to parse session file")?;
        Ok(Some(stored))
    }

    fn write(path: &Path, stored: &StoredToken) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(stored)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|s| s.token))
    }

    fn set(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        Self::write(&self.path(), &stored)
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// In-process store, nothing survives the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        let guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}
