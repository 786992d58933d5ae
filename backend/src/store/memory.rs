use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{newest_first, Store, Stored};
use crate::error::StoreResult;
use crate::models::{AuditEvent, CatalogRecord, LocomotiveRecord, RollingStockRecord};

/// In-process store backed by locked vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    locomotives: RwLock<Vec<Stored<LocomotiveRecord>>>,
    rolling_stock: RwLock<Vec<Stored<RollingStockRecord>>>,
    history: RwLock<Vec<AuditEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of stored locomotives in insertion order.
    pub async fn locomotives(&self) -> Vec<Stored<LocomotiveRecord>> {
        self.locomotives.read().await.clone()
    }

    /// Snapshot of stored rolling stock in insertion order.
    pub async fn rolling_stock(&self) -> Vec<Stored<RollingStockRecord>> {
        self.rolling_stock.read().await.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, record: CatalogRecord) -> StoreResult<String> {
        let id = match record {
            CatalogRecord::Locomotive(loco) => {
                let stored = Stored::new(loco);
                let id = stored.id.clone();
                self.locomotives.write().await.push(stored);
                id
            }
            CatalogRecord::RollingStock(stock) => {
                let stored = Stored::new(stock);
                let id = stored.id.clone();
                self.rolling_stock.write().await.push(stored);
                id
            }
        };
        Ok(id)
    }

    async fn append_audit_event(&self, event: AuditEvent) -> StoreResult<()> {
        self.history.write().await.push(event);
        Ok(())
    }

    async fn audit_history(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let events = self.history.read().await.clone();
        Ok(newest_first(events, limit))
    }
}
