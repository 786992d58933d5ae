//! REST API request and response bodies.
//!
//! Field names are snake_case on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::import::{ImportReport, ImportedItem, LocomotiveSummary};
use crate::models::AuditEvent;

/// Body of `POST /api/import/jmri`: one XML document per entry.
pub type RosterImportRequest = Vec<String>;

/// Response to a roster (JMRI XML) import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterImportResponse {
    pub success: bool,
    pub imported_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub locomotives: Vec<LocomotiveSummary>,
}

impl From<ImportReport<LocomotiveSummary>> for RosterImportResponse {
    fn from(report: ImportReport<LocomotiveSummary>) -> Self {
        Self {
            success: report.success,
            imported_count: report.imported_count,
            skipped_count: report.skipped_count,
            errors: report.errors,
            locomotives: report.imported_items,
        }
    }
}

/// Response to a CSV import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvImportResponse {
    pub success: bool,
    pub imported_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub imported_items: Vec<ImportedItem>,
}

impl From<ImportReport<ImportedItem>> for CsvImportResponse {
    fn from(report: ImportReport<ImportedItem>) -> Self {
        Self {
            success: report.success,
            imported_count: report.imported_count,
            skipped_count: report.skipped_count,
            errors: report.errors,
            imported_items: report.imported_items,
        }
    }
}

/// Response to `GET /api/backup/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub events: Vec<AuditEvent>,
}

impl From<Vec<AuditEvent>> for HistoryResponse {
    fn from(events: Vec<AuditEvent>) -> Self {
        Self { total: events.len(), events }
    }
}

/// Body returned with any non-2xx status.
pub fn error_response(error: &str) -> Value {
    json!({
        "success": false,
        "error": error,
    })
}
