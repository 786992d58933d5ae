//! Batch import report.

use serde::{Deserialize, Serialize};

use crate::models::LocomotiveRecord;

/// Outcome of one batch call, built incrementally by an orchestrator.
///
/// `success` is true iff at least one item was imported; an empty batch
/// reports `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportReport<T> {
    pub success: bool,
    pub imported_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub imported_items: Vec<T>,
}

impl<T> ImportReport<T> {
    pub fn new() -> Self {
        Self {
            success: false,
            imported_count: 0,
            skipped_count: 0,
            errors: Vec::new(),
            imported_items: Vec::new(),
        }
    }

    /// Count one imported item.
    pub fn record_import(&mut self, item: T) {
        self.imported_items.push(item);
        self.imported_count += 1;
        self.success = true;
    }

    /// Count one skipped item with its message.
    pub fn record_skip(&mut self, message: String) {
        self.errors.push(message);
        self.skipped_count += 1;
    }

    /// Record an error that is not tied to a single item.
    pub fn record_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Summary line for logs.
    pub fn summary(&self) -> String {
        format!(
            "Imported: {}, skipped: {}, errors: {}",
            self.imported_count,
            self.skipped_count,
            self.errors.len()
        )
    }
}

impl<T> Default for ImportReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one locomotive imported from a roster document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocomotiveSummary {
    pub brand: String,
    pub model: String,
    pub dcc_address: u32,
}

impl From<&LocomotiveRecord> for LocomotiveSummary {
    fn from(record: &LocomotiveRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            model: record.model.clone(),
            dcc_address: record.dcc_address,
        }
    }
}

/// Summary of one record imported from a CSV row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportedItem {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dcc_address: Option<u32>,
}
