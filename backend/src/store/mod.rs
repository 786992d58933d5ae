//! Record store and audit sink.
//!
//! The importers only need two outward calls: "store a normalized record"
//! and "append an audit event". Both live behind the [`Store`] trait, which
//! is injected into the orchestrators.
//!
//! - [`MemoryStore`] - in-process store, used by tests and `--memory`
//! - [`JsonFileStore`] - one JSON file per record on disk

mod file;
mod memory;

pub use file::{JsonFileStore, DEFAULT_DATA_DIR};
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{AuditEvent, CatalogRecord};

/// Persistence collaborator of the import pipeline.
///
/// Implementations serialize their own writes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist one record and return its identifier.
    async fn insert(&self, record: CatalogRecord) -> StoreResult<String>;

    /// Append one event to the history log.
    async fn append_audit_event(&self, event: AuditEvent) -> StoreResult<()>;

    /// Most recent events first, at most `limit`.
    async fn audit_history(&self, limit: usize) -> StoreResult<Vec<AuditEvent>>;
}

/// A record as persisted: identifier and timestamps around the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stored<T> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Stored<T> {
    pub fn new(record: T) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            record,
        }
    }
}

/// Newest first, truncated to `limit`.
fn newest_first(mut events: Vec<AuditEvent>, limit: usize) -> Vec<AuditEvent> {
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    events.truncate(limit);
    events
}
