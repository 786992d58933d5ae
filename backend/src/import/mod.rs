//! Batch import orchestrators.
//!
//! Both orchestrators process items strictly in order, isolate per-item
//! failures into the report and emit at most one audit event per call.

pub mod csv;
pub mod report;
pub mod roster;

pub use self::csv::{csv_template, import_csv_batch, CsvTarget};
pub use report::{ImportReport, ImportedItem, LocomotiveSummary};
pub use roster::{import_roster_batch, prepare_roster_item};
