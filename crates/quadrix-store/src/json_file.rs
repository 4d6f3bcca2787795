//! JSON file store.
//!
//! The whole state is one pretty-printed JSON document. Every write takes an
//! exclusive lock on a sibling `.lock` file, rereads the document, applies
//! the change and replaces the file through a temp file + rename. Several
//! handles (or processes) on one path therefore never overwrite each other.
//! Reads load the current file; the rename means they never see a partial
//! document.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use fd_lock::RwLock;
use tokio::sync::Mutex;

use quadrix_core::error::StoreError;
use quadrix_core::model::{Answer, AnsweredEquation, Equation, EquationId, SetId, UserId};
use quadrix_core::traits::EquationStore;

use crate::state::StoreState;

/// A store persisted to a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    // Serialises writers of this handle; the file lock covers other handles.
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// The file is parsed once here so a corrupt store fails early.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = load_state(&path)?;

        tracing::debug!(
            path = %path.display(),
            users = state.users.len(),
            sets = state.sets.len(),
            "opened json store"
        );
        Ok(Self {
            path,
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn read<T>(&self, op: impl FnOnce(&StoreState) -> Result<T>) -> Result<T> {
        op(&load_state(&self.path)?)
    }

    /// Reread the file under an exclusive lock, apply `op` and write the
    /// result back. Nothing is written when `op` fails.
    ///
    /// The locked section is synchronous: a second handle in the same
    /// runtime blocks on the lock and must not wait on this task.
    async fn write<T>(&self, op: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        let _writer = self.writer.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let lock_path = self.lock_path();
        let lock_file: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;
        let mut lock = RwLock::new(lock_file);
        let _guard = lock
            .write()
            .with_context(|| format!("failed to lock {}", lock_path.display()))?;

        let mut state = load_state(&self.path)?;
        let out = op(&mut state)?;
        persist(&self.path, &state)?;
        Ok(out)
    }
}

/// Parse the store file. A missing or blank file is an empty store.
fn load_state(path: &Path) -> Result<StoreState> {
    if !path.exists() {
        return Ok(StoreState::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read store: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(StoreState::default());
    }
    serde_json::from_str(&content).map_err(|e| {
        anyhow::Error::new(StoreError::Corrupt(e.to_string()))
            .context(format!("failed to parse store: {}", path.display()))
    })
}

fn persist(path: &Path, state: &StoreState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("failed to serialize store")?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write store to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace store at {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl EquationStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        login: &str,
    ) -> Result<UserId> {
        self.write(|s| s.register_user(first_name, last_name, login, Utc::now()))
            .await
    }

    async fn create_set(&self, owner: UserId) -> Result<SetId> {
        self.write(|s| s.create_set(owner, Utc::now())).await
    }

    async fn create_set_with(&self, owner: UserId, equations: &[Equation]) -> Result<SetId> {
        self.write(|s| s.create_set_with(owner, equations, Utc::now()))
            .await
    }

    async fn save_equation(&self, set: SetId, equation: &Equation) -> Result<()> {
        self.write(|s| s.save_equation(set, equation)).await
    }

    async fn list_equations(&self, set: SetId) -> Result<Vec<Equation>> {
        self.read(|s| s.list_equations(set))
    }

    async fn record_answer(&self, set: SetId, equation: EquationId, answer: Answer) -> Result<()> {
        self.write(|s| s.record_answer(set, equation, answer)).await
    }

    async fn list_answered(&self, set: SetId) -> Result<Vec<AnsweredEquation>> {
        self.read(|s| s.list_answered(set))
    }

    async fn latest_set(&self, owner: UserId) -> Result<Option<SetId>> {
        self.read(|s| s.latest_set(owner))
    }
}
