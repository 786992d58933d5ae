//! Roster (JMRI XML) batch orchestrator.

use crate::api::logs::{log_info, log_info_indent, log_success, log_success_indent, log_warning};
use crate::error::{ItemError, ItemResult, StoreResult};
use crate::models::{AuditEvent, AuditEventType, CatalogRecord, LocomotiveRecord};
use crate::roster::normalize_document;
use crate::store::Store;
use crate::validation::validate_locomotive;

use super::report::{ImportReport, LocomotiveSummary};

/// Import a batch of roster documents, one locomotive each.
///
/// Items are processed in order. A document that cannot be parsed, has no
/// locomotive node or fails validation is skipped with an
/// `"Archivo <i>: ..."` message; other items are unaffected. Store or audit
/// failures abort the batch and are returned as errors; records inserted
/// before that stay persisted.
pub async fn import_roster_batch(
    store: &dyn Store,
    documents: &[String],
) -> StoreResult<ImportReport<LocomotiveSummary>> {
    log_info(format!("🚂 Importing {} roster document(s)...", documents.len()));

    let mut report = ImportReport::new();
    let mut decoders = 0;
    let mut sound_projects = 0;

    for (i, xml) in documents.iter().enumerate() {
        let index = i + 1;
        match prepare_roster_item(xml) {
            Ok(record) => {
                let summary = LocomotiveSummary::from(&record);
                if !record.decoder_model.is_empty() {
                    decoders += 1;
                }
                if !record.sound_project.is_empty() {
                    sound_projects += 1;
                    log_info_indent(format!("Proyecto: {}", record.sound_project), 2);
                }
                store.insert(CatalogRecord::Locomotive(record)).await?;
                log_success_indent(
                    format!(
                        "Archivo {}: {} {} (dirección {})",
                        index, summary.brand, summary.model, summary.dcc_address
                    ),
                    1,
                );
                report.record_import(summary);
            }
            Err(err) => {
                let message = format!("Archivo {}: {}", index, err);
                log_warning(message.clone());
                report.record_skip(message);
            }
        }
    }

    if report.imported_count > 0 {
        let mut event = AuditEvent::new(AuditEventType::XmlImport);
        event.locomotives_count = report.imported_count;
        event.decoders_count = decoders;
        event.sound_projects_count = sound_projects;
        event.skipped_count = report.skipped_count;
        store.append_audit_event(event).await?;
    }

    log_success(report.summary());
    Ok(report)
}

/// Normalize and validate one document without touching the store.
pub fn prepare_roster_item(xml: &str) -> ItemResult<LocomotiveRecord> {
    let record = normalize_document(xml)?;
    validate_locomotive(&record).map_err(|errors| ItemError::Validation { errors })?;
    Ok(record)
}
