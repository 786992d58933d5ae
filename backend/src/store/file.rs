//! File-backed store.
//!
//! Saves one pretty-printed JSON document per record:
//!
//! ```text
//! <data_dir>/locomotives/<id>.json
//! <data_dir>/rolling_stock/<id>.json
//! <data_dir>/history/<id>.json
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::{newest_first, Store, Stored};
use crate::error::{StoreError, StoreResult};
use crate::models::{AuditEvent, CatalogRecord};

/// Directory where records are stored (relative to current dir)
pub const DEFAULT_DATA_DIR: &str = ".railcat/data";

const HISTORY_DIR: &str = "history";

/// Store writing JSON files under a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. Directories are created lazily.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: PathBuf::from(dir.as_ref()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn write_json<T: Serialize>(&self, collection: &str, id: &str, value: &T) -> StoreResult<()> {
        let dir = self.data_dir.join(collection);
        let content = serde_json::to_string_pretty(value)?;

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(format!("{}.json", id)), content).await?;
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::with_dir(DEFAULT_DATA_DIR)
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn insert(&self, record: CatalogRecord) -> StoreResult<String> {
        let collection = record.collection();
        let stored = Stored::new(record);
        self.write_json(collection, &stored.id, &stored).await?;
        Ok(stored.id)
    }

    async fn append_audit_event(&self, event: AuditEvent) -> StoreResult<()> {
        self.write_json(HISTORY_DIR, &event.id, &event).await
    }

    async fn audit_history(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let dir = self.data_dir.join(HISTORY_DIR);
        if !fs::try_exists(&dir).await? {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                let content = fs::read_to_string(&path).await?;
                match serde_json::from_str::<AuditEvent>(&content) {
                    Ok(event) => events.push(event),
                    Err(e) => {
                        return Err(StoreError::Unavailable(format!(
                            "corrupt history entry {}: {}",
                            path.display(),
                            e
                        )))
                    }
                }
            }
        }

        Ok(newest_first(events, limit))
    }
}
