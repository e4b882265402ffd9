//! Persistent chat-id lists.
//!
//! Each list is one JSON file holding an array of chat identifiers,
//! overwritten wholesale on every mutation. Single-process, single-writer;
//! there is no cross-process locking.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::error::AppResult;

/// Load a set of chat ids from a JSON file.
///
/// A missing file yields an empty set. Malformed content is an error — the
/// callers surface it as a fatal startup failure rather than silently
/// starting with an empty list.
pub fn load_ids(path: &Path) -> AppResult<HashSet<i64>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let raw = std::fs::read_to_string(path)?;
    let ids: Vec<i64> = serde_json::from_str(&raw)?;
    Ok(ids.into_iter().collect())
}

/// Overwrite the file with the current set, sorted for stable diffs.
pub fn save_ids(path: &Path, ids: &HashSet<i64>) -> AppResult<()> {
    let mut sorted: Vec<i64> = ids.iter().copied().collect();
    sorted.sort_unstable();
    let json = serde_json::to_string(&sorted)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Thread-safe set of chat ids with write-through persistence.
///
/// Shared between the command handlers and the scheduler; all access goes
/// through the internal mutex, and every successful mutation hits the disk
/// before it is acknowledged to the caller.
pub struct UserStore {
    path: PathBuf,
    ids: Mutex<HashSet<i64>>,
}

impl UserStore {
    /// Load the store from its backing file.
    ///
    /// # Errors
    /// Propagates `load_ids` failures (malformed file content).
    pub fn load<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        let path = path.into();
        let ids = load_ids(&path)?;
        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }

    /// Insert `id` into the set.
    ///
    /// Returns `false` (and skips the disk write) when the id was already
    /// present, so callers can report "already there" back to the user.
    pub async fn add(&self, id: i64) -> AppResult<bool> {
        let mut ids = self.ids.lock().await;
        if !ids.insert(id) {
            return Ok(false);
        }
        save_ids(&self.path, &ids)?;
        Ok(true)
    }

    /// Remove `id` from the set.
    ///
    /// Returns `false` (and skips the disk write) when the id was not a
    /// member.
    pub async fn remove(&self, id: i64) -> AppResult<bool> {
        let mut ids = self.ids.lock().await;
        if !ids.remove(&id) {
            return Ok(false);
        }
        save_ids(&self.path, &ids)?;
        Ok(true)
    }

    /// Membership check.
    pub async fn contains(&self, id: i64) -> bool {
        self.ids.lock().await.contains(&id)
    }

    /// Point-in-time sorted copy, for iterating without holding the lock.
    pub async fn snapshot(&self) -> Vec<i64> {
        let ids = self.ids.lock().await;
        let mut sorted: Vec<i64> = ids.iter().copied().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Number of members.
    pub async fn len(&self) -> usize {
        self.ids.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ids.lock().await.is_empty()
    }
}
