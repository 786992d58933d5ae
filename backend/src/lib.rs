//! # Railcat - model-railway collection import pipeline
//!
//! Railcat imports locomotives and rolling stock into a collection catalog
//! from two sources: JMRI roster XML files and CSV spreadsheets. Every item
//! is normalized into a catalog record, validated, and handed to a [`Store`].
//! A bad item never aborts its batch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ JMRI roster │────▶│   roster    │────▶│             │     │             │
//! │    (XML)    │     │ (normalize) │     │  validation │────▶│    Store    │
//! ├─────────────┤     ├─────────────┤     │ (JSON Schema│     │ + audit log │
//! │  CSV file   │────▶│   parser    │────▶│             │     │             │
//! │ (ISO/UTF8)  │     │  (auto-enc) │     └─────────────┘     └─────────────┘
//! └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use railcat::{import_roster_batch, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     let xml = std::fs::read_to_string("BR_218.xml").unwrap();
//!     let report = import_roster_batch(&store, &[xml]).await.unwrap();
//!     println!("{}", report.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - Catalog records and audit events
//! - [`parser`] - CSV parsing with encoding detection
//! - [`roster`] - JMRI roster extraction and normalization
//! - [`import`] - Batch orchestrators and reports
//! - [`validation`] - JSON Schema validation of records
//! - [`store`] - Record store and audit sink
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server and log streaming

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod roster;

// Import
pub mod import;

// Validation
pub mod validation;

// Persistence
pub mod store;

pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ItemError, RosterError, ServerError, StoreError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AuditEvent, AuditEventType, CVModification, CatalogRecord, Condition, DecoderDescriptor,
    FunctionMapping, LocomotiveRecord, LocomotiveType, RollingStockRecord, StockType,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, decode_upload, detect_encoding, parse_csv, ParseResult};

pub use roster::{classify, extract_locomotive, filter_cvs, merge_labels, normalize_document, RosterLocomotive};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use import::{
    csv_template, import_csv_batch, import_roster_batch, CsvTarget, ImportReport, ImportedItem,
    LocomotiveSummary,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, validate, validate_locomotive, validate_rolling_stock};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{JsonFileStore, MemoryStore, Store, Stored};

pub use config::AppConfig;

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, AppState};
}
