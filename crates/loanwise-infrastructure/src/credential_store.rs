//! File-backed credential store.
//!
//! Persists the session token and cached user profile as a single JSON
//! document so the pair survives process restarts. Absence of the file is
//! the canonical "logged out" signal.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use loanwise_core::session::{CredentialStore, StoredCredentials};
use loanwise_core::{LoanwiseError, Result};

use crate::paths::{CREDENTIALS_FILE, LoanwisePaths};

const LOCK_FILE: &str = "credentials.lock";

/// Durable credential persistence over a single JSON file.
///
/// Writes go through a temp-file-then-rename sequence under an exclusive
/// advisory lock, and reads take the shared lock, so a concurrent reader
/// observes either the previous credential pair or the new one, never a
/// mix.
#[derive(Clone)]
pub struct FileCredentialStore {
    base_dir: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the platform default location
    /// (`~/.config/loanwise` on Linux).
    pub fn default_location() -> Result<Self> {
        Self::new(LoanwisePaths::config_dir()?)
    }

    fn credentials_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CREDENTIALS_FILE)
    }

    fn lock_path(base_dir: &Path) -> PathBuf {
        base_dir.join(LOCK_FILE)
    }

    fn read_blocking(base_dir: &Path) -> Result<Option<StoredCredentials>> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(Self::lock_path(base_dir))?;
        FileExt::lock_shared(&lock)
            .map_err(|e| LoanwiseError::storage(format!("Failed to lock credential store: {e}")))?;

        let path = Self::credentials_path(base_dir);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let credentials: StoredCredentials = serde_json::from_str(&json)?;
        Ok(Some(credentials))
    }

    fn write_blocking(base_dir: &Path, credentials: &StoredCredentials) -> Result<()> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(Self::lock_path(base_dir))?;
        FileExt::lock_exclusive(&lock)
            .map_err(|e| LoanwiseError::storage(format!("Failed to lock credential store: {e}")))?;

        let path = Self::credentials_path(base_dir);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(credentials)?;

        fs::write(&tmp_path, json)?;
        // Single rename keeps token and user visible only as a pair.
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn clear_blocking(base_dir: &Path) -> Result<()> {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(Self::lock_path(base_dir))?;
        FileExt::lock_exclusive(&lock)
            .map_err(|e| LoanwiseError::storage(format!("Failed to lock credential store: {e}")))?;

        let path = Self::credentials_path(base_dir);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    async fn run_blocking<T, F>(&self, task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(PathBuf) -> Result<T> + Send + 'static,
    {
        let base_dir = self.base_dir.clone();
        tokio::task::spawn_blocking(move || task(base_dir))
            .await
            .map_err(|e| LoanwiseError::internal(format!("Failed to join task: {e}")))?
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        self.run_blocking(|dir| Self::read_blocking(&dir)).await
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let credentials = credentials.clone();
        self.run_blocking(move |dir| Self::write_blocking(&dir, &credentials))
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.run_blocking(|dir| Self::clear_blocking(&dir)).await
    }
}
