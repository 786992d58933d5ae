//! CSV batch orchestrator and row mappers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::logs::{log_error, log_info, log_success, log_success_indent, log_warning};
use crate::error::{ItemError, ItemResult, StoreResult};
use crate::models::{
    AuditEvent, AuditEventType, CatalogRecord, Condition, LocomotiveRecord, LocomotiveType,
    RollingStockRecord, StockType,
};
use crate::parser::parse_csv;
use crate::store::Store;
use crate::validation::{validate_locomotive, validate_rolling_stock};

use super::report::{ImportReport, ImportedItem};

/// Recognized locomotive columns, in template order.
pub const LOCOMOTIVE_COLUMNS: &[&str] = &[
    "brand",
    "model",
    "reference",
    "locomotive_type",
    "dcc_address",
    "decoder_brand",
    "decoder_model",
    "condition",
    "era",
    "railway_company",
    "purchase_date",
    "price",
    "registration_number",
    "notes",
];

/// Recognized rolling stock columns, in template order.
pub const ROLLING_STOCK_COLUMNS: &[&str] = &[
    "brand",
    "model",
    "reference",
    "stock_type",
    "condition",
    "era",
    "railway_company",
    "purchase_date",
    "price",
    "notes",
];

/// Which collection a CSV file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvTarget {
    Locomotives,
    RollingStock,
}

impl CsvTarget {
    /// Parse the URL / CLI slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_lowercase().as_str() {
            "locomotives" | "locomotoras" => Some(Self::Locomotives),
            "rolling-stock" | "rolling_stock" | "vagones" => Some(Self::RollingStock),
            _ => None,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Locomotives => LOCOMOTIVE_COLUMNS,
            Self::RollingStock => ROLLING_STOCK_COLUMNS,
        }
    }

    fn example_row(&self) -> &'static str {
        match self {
            Self::Locomotives => {
                "Roco,BR 218,73400,diesel,218,ESU,LokSound 5,nuevo,IV,DB,2024-01-15,189.90,218 001-5,Ejemplo"
            }
            Self::RollingStock => {
                "Arnold,Tolva,HN6123,vagon_mercancias,nuevo,IV,RENFE,2024-03-05,32.50,Ejemplo"
            }
        }
    }
}

/// Header row plus one example row for the target.
pub fn csv_template(target: CsvTarget) -> String {
    format!("{}\n{}\n", target.columns().join(","), target.example_row())
}

/// Import one CSV blob into the target collection.
///
/// Data rows are 1-indexed in error messages (`"Fila <i>: ..."`). A blob
/// that cannot be parsed at all yields a report with a single error and no
/// skips. Store or audit failures abort the batch.
pub async fn import_csv_batch(
    store: &dyn Store,
    target: CsvTarget,
    content: &str,
) -> StoreResult<ImportReport<ImportedItem>> {
    let mut report = ImportReport::new();

    log_info("📖 Reading CSV...");
    let parsed = match parse_csv(content) {
        Ok(parsed) => parsed,
        Err(err) => {
            log_error(format!("CSV: {}", err));
            report.record_error(format!("CSV: {}", err));
            return Ok(report);
        }
    };
    log_success(format!("Read {} rows", parsed.rows.len()));

    let unknown: Vec<&str> = parsed
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| !h.is_empty() && !target.columns().contains(h))
        .collect();
    if !unknown.is_empty() {
        log_warning(format!("Ignoring unknown columns: {}", unknown.join(", ")));
    }

    for (i, row) in parsed.rows.iter().enumerate() {
        let index = i + 1;
        let prepared = match row {
            Ok(fields) => record_from_row(target, fields),
            Err(message) => Err(ItemError::MalformedInput(message.clone())),
        };

        match prepared {
            Ok(record) => {
                let mut item = summarize(&record);
                item.id = store.insert(record).await?;
                log_success_indent(format!("Fila {}: {} {}", index, item.brand, item.model), 1);
                report.record_import(item);
            }
            Err(err) => {
                let message = format!("Fila {}: {}", index, err);
                log_warning(message.clone());
                report.record_skip(message);
            }
        }
    }

    if report.imported_count > 0 {
        let mut event = AuditEvent::new(AuditEventType::CsvImport);
        match target {
            CsvTarget::Locomotives => event.locomotives_count = report.imported_count,
            CsvTarget::RollingStock => event.rolling_stock_count = report.imported_count,
        }
        event.skipped_count = report.skipped_count;
        store.append_audit_event(event).await?;
    }

    log_success(report.summary());
    Ok(report)
}

/// Build and validate the record for one row.
pub fn record_from_row(target: CsvTarget, row: &Map<String, Value>) -> ItemResult<CatalogRecord> {
    match target {
        CsvTarget::Locomotives => {
            let record = locomotive_from_row(row)?;
            validate_locomotive(&record).map_err(|errors| ItemError::Validation { errors })?;
            Ok(CatalogRecord::Locomotive(record))
        }
        CsvTarget::RollingStock => {
            let record = rolling_stock_from_row(row)?;
            validate_rolling_stock(&record).map_err(|errors| ItemError::Validation { errors })?;
            Ok(CatalogRecord::RollingStock(record))
        }
    }
}

/// Map a locomotive row. `dcc_address` is required and must be an integer.
pub fn locomotive_from_row(row: &Map<String, Value>) -> ItemResult<LocomotiveRecord> {
    let dcc_address = required(row, "dcc_address")?
        .parse::<u32>()
        .map_err(|_| ItemError::missing("dcc_address"))?;

    let mut record = LocomotiveRecord::new(field(row, "brand"), field(row, "model"), dcc_address);
    record.reference = field(row, "reference").to_string();
    record.locomotive_type = match optional(row, "locomotive_type") {
        Some(code) => LocomotiveType::from_code(code)
            .ok_or_else(|| ItemError::invalid(format!("locomotive_type desconocido: '{}'", code)))?,
        None => LocomotiveType::default(),
    };
    record.decoder_brand = field(row, "decoder_brand").to_string();
    record.decoder_model = field(row, "decoder_model").to_string();
    record.registration_number = field(row, "registration_number").to_string();
    record.notes = field(row, "notes").to_string();
    record.condition = condition(row)?;
    record.era = optional(row, "era").map(str::to_string);
    record.railway_company = optional(row, "railway_company").map(str::to_string);
    record.purchase_date = optional(row, "purchase_date").map(str::to_string);
    record.price = price(row)?;
    Ok(record)
}

/// Map a rolling stock row. `reference` is required.
pub fn rolling_stock_from_row(row: &Map<String, Value>) -> ItemResult<RollingStockRecord> {
    let reference = required(row, "reference")?.to_string();

    let stock_type = match optional(row, "stock_type") {
        Some(code) => StockType::from_code(code)
            .ok_or_else(|| ItemError::invalid(format!("stock_type desconocido: '{}'", code)))?,
        None => StockType::default(),
    };

    Ok(RollingStockRecord {
        brand: field(row, "brand").to_string(),
        model: field(row, "model").to_string(),
        reference,
        stock_type,
        condition: condition(row)?,
        era: optional(row, "era").map(str::to_string),
        railway_company: optional(row, "railway_company").map(str::to_string),
        purchase_date: optional(row, "purchase_date").map(str::to_string),
        price: price(row)?,
        notes: optional(row, "notes").map(str::to_string),
    })
}

fn summarize(record: &CatalogRecord) -> ImportedItem {
    match record {
        CatalogRecord::Locomotive(loco) => ImportedItem {
            id: String::new(),
            brand: loco.brand.clone(),
            model: loco.model.clone(),
            reference: loco.reference.clone(),
            dcc_address: Some(loco.dcc_address),
        },
        CatalogRecord::RollingStock(stock) => ImportedItem {
            id: String::new(),
            brand: stock.brand.clone(),
            model: stock.model.clone(),
            reference: stock.reference.clone(),
            dcc_address: None,
        },
    }
}

fn field<'a>(row: &'a Map<String, Value>, column: &str) -> &'a str {
    row.get(column).and_then(Value::as_str).map(str::trim).unwrap_or("")
}

fn optional<'a>(row: &'a Map<String, Value>, column: &str) -> Option<&'a str> {
    Some(field(row, column)).filter(|v| !v.is_empty())
}

fn required<'a>(row: &'a Map<String, Value>, column: &str) -> ItemResult<&'a str> {
    optional(row, column).ok_or_else(|| ItemError::missing(column))
}

fn condition(row: &Map<String, Value>) -> ItemResult<Condition> {
    match optional(row, "condition") {
        Some(code) => Condition::from_code(code)
            .ok_or_else(|| ItemError::invalid(format!("condition desconocida: '{}'", code))),
        None => Ok(Condition::default()),
    }
}

/// Accepts `189.90` and `189,90`.
fn price(row: &Map<String, Value>) -> ItemResult<Option<f64>> {
    optional(row, "price")
        .map(|raw| {
            raw.replace(',', ".")
                .parse::<f64>()
                .map_err(|_| ItemError::invalid(format!("price no numérico: '{}'", raw)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_locomotive_row_mapping() {
        let record = locomotive_from_row(&row(json!({
            "brand": "Roco",
            "model": "BR 218",
            "reference": "73400",
            "locomotive_type": "diesel",
            "dcc_address": "218",
            "condition": "usado",
            "era": "IV",
            "price": "189,90",
            "registration_number": "218 001-5"
        })))
        .unwrap();

        assert_eq!(record.dcc_address, 218);
        assert_eq!(record.locomotive_type, LocomotiveType::Diesel);
        assert_eq!(record.condition, Condition::Usado);
        assert_eq!(record.era.as_deref(), Some("IV"));
        assert_eq!(record.railway_company, None);
        assert_eq!(record.price, Some(189.90));
        assert_eq!(record.registration_number, "218 001-5");
    }

    #[test]
    fn test_locomotive_defaults() {
        let record = locomotive_from_row(&row(json!({ "dcc_address": "3" }))).unwrap();
        assert_eq!(record.locomotive_type, LocomotiveType::Electrica);
        assert_eq!(record.condition, Condition::Nuevo);
        assert_eq!(record.price, None);
    }

    #[test]
    fn test_dcc_address_required_and_numeric() {
        let missing = locomotive_from_row(&row(json!({ "brand": "Roco", "dcc_address": "" })));
        assert!(matches!(missing, Err(ItemError::MissingRequiredField { .. })));

        let absent = locomotive_from_row(&row(json!({ "brand": "Roco" })));
        assert!(matches!(absent, Err(ItemError::MissingRequiredField { .. })));

        let text = locomotive_from_row(&row(json!({ "dcc_address": "tres" })));
        assert!(matches!(text, Err(ItemError::MissingRequiredField { .. })));
    }

    #[test]
    fn test_unknown_enum_and_bad_price_are_validation_errors() {
        let bad_type = locomotive_from_row(&row(json!({ "dcc_address": "3", "locomotive_type": "maglev" })));
        assert!(matches!(bad_type, Err(ItemError::Validation { .. })));

        let bad_price = rolling_stock_from_row(&row(json!({ "reference": "X1", "price": "caro" })));
        assert!(matches!(bad_price, Err(ItemError::Validation { .. })));
    }

    #[test]
    fn test_rolling_stock_reference_required() {
        let missing = rolling_stock_from_row(&row(json!({ "brand": "Arnold", "reference": "" })));
        assert!(matches!(missing, Err(ItemError::MissingRequiredField { .. })));

        let record = rolling_stock_from_row(&row(json!({
            "brand": "Arnold",
            "reference": "HN6123",
            "stock_type": "coche_viajeros"
        })))
        .unwrap();
        assert_eq!(record.stock_type, StockType::CocheViajeros);
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_template_lists_columns() {
        let template = csv_template(CsvTarget::Locomotives);
        let header = template.lines().next().unwrap();
        assert_eq!(header.split(',').count(), LOCOMOTIVE_COLUMNS.len());
        assert!(header.contains("dcc_address"));

        let parsed = parse_csv(&csv_template(CsvTarget::RollingStock)).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.headers.contains(&"stock_type".to_string()));
    }

    #[test]
    fn test_target_slugs() {
        assert_eq!(CsvTarget::from_slug("locomotives"), Some(CsvTarget::Locomotives));
        assert_eq!(CsvTarget::from_slug("rolling-stock"), Some(CsvTarget::RollingStock));
        assert_eq!(CsvTarget::from_slug("decoders"), None);
    }

    #[tokio::test]
    async fn test_locomotive_batch_with_missing_address() {
        let store = MemoryStore::new();
        let csv = "brand,model,reference,dcc_address\nRoco,BR 218,73400,\nLenz,V 100,40100,55";
        let report = import_csv_batch(&store, CsvTarget::Locomotives, csv).await.unwrap();

        assert!(report.success);
        assert_eq!(report.imported_count, 1);
        assert_eq!(report.skipped_count, 1);
        assert!(report.errors[0].starts_with("Fila 1: "));
        assert!(report.errors[0].contains("dcc_address"));
        assert_eq!(report.imported_items[0].dcc_address, Some(55));
        assert!(!report.imported_items[0].id.is_empty());

        let history = store.audit_history(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, AuditEventType::CsvImport);
        assert_eq!(history[0].locomotives_count, 1);
    }

    #[tokio::test]
    async fn test_rolling_stock_batch() {
        let store = MemoryStore::new();
        let report = import_csv_batch(&store, CsvTarget::RollingStock, &csv_template(CsvTarget::RollingStock))
            .await
            .unwrap();

        assert_eq!(report.imported_count, 1);
        assert_eq!(store.rolling_stock().await[0].record.reference, "HN6123");
        assert_eq!(store.audit_history(10).await.unwrap()[0].rolling_stock_count, 1);
    }

    #[tokio::test]
    async fn test_empty_blob_reports_error_without_skips() {
        let store = MemoryStore::new();
        let report = import_csv_batch(&store, CsvTarget::Locomotives, "").await.unwrap();

        assert!(!report.success);
        assert_eq!(report.skipped_count, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(store.audit_history(10).await.unwrap().is_empty());
    }
}
