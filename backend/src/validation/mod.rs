//! JSON Schema validation for catalog records.
//!
//! Every record assembled by an importer is checked against an embedded
//! Draft 7 schema before it reaches the store. Schemas are embedded at
//! compile time from the `schemas/` directory:
//!
//! - `locomotive.json`
//! - `rolling-stock.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use railcat::models::LocomotiveRecord;
//! use railcat::validation::validate_locomotive;
//!
//! let loco = LocomotiveRecord::new("ESU", "BR 218", 218);
//! assert!(validate_locomotive(&loco).is_ok());
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::models::{LocomotiveRecord, RollingStockRecord};

const LOCOMOTIVE_SCHEMA: &str = include_str!("../../schemas/locomotive.json");
const ROLLING_STOCK_SCHEMA: &str = include_str!("../../schemas/rolling-stock.json");

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a locomotive record.
///
/// `dcc_address` must lie within the DCC long address range `0..=10239`;
/// anything above is reported as a validation error and the item is skipped.
pub fn validate_locomotive(record: &LocomotiveRecord) -> Result<(), Vec<String>> {
    validate_embedded(LOCOMOTIVE_SCHEMA, record)
}

/// Validate a rolling stock record.
pub fn validate_rolling_stock(record: &RollingStockRecord) -> Result<(), Vec<String>> {
    validate_embedded(ROLLING_STOCK_SCHEMA, record)
}

fn validate_embedded<T: Serialize>(schema: &str, record: &T) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(schema)
        .map_err(|e| vec![format!("Invalid embedded schema: {}", e)])?;
    let data = serde_json::to_value(record)
        .map_err(|e| vec![format!("Cannot serialize record: {}", e)])?;
    validate(&schema, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CVModification, FunctionMapping, StockType};
    use serde_json::json;

    fn wagon(reference: &str) -> RollingStockRecord {
        RollingStockRecord {
            brand: "Arnold".into(),
            model: "Tolva".into(),
            reference: reference.into(),
            stock_type: StockType::VagonMercancias,
            condition: Default::default(),
            era: None,
            railway_company: None,
            purchase_date: None,
            price: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_locomotive() {
        let mut loco = LocomotiveRecord::new("ESU", "BR 218", 218);
        loco.functions.push(FunctionMapping {
            function_number: "F0".into(),
            description: "Luces".into(),
            is_sound: false,
        });
        loco.cv_modifications.push(CVModification {
            cv_number: 3,
            value: 10,
            description: "Aceleración".into(),
        });
        assert!(validate_locomotive(&loco).is_ok());
    }

    #[test]
    fn test_negative_cv_value_is_valid() {
        let mut loco = LocomotiveRecord::new("ESU", "BR 218", 218);
        loco.cv_modifications.push(CVModification {
            cv_number: 2,
            value: -1,
            description: "Vstart".into(),
        });
        assert!(validate_locomotive(&loco).is_ok());
    }

    #[test]
    fn test_locomotive_address_out_of_range() {
        let loco = LocomotiveRecord::new("ESU", "BR 218", 20000);
        let errors = validate_locomotive(&loco).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut loco = LocomotiveRecord::new("ESU", "BR 218", 218);
        loco.price = Some(-1.0);
        assert!(validate_locomotive(&loco).is_err());
    }

    #[test]
    fn test_rolling_stock_reference_required() {
        assert!(validate_rolling_stock(&wagon("45001")).is_ok());
        assert!(validate_rolling_stock(&wagon("")).is_err());
    }

    #[test]
    fn test_generic_validate() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        });
        assert!(validate(&schema, &json!({ "name": "test" })).is_ok());
        assert!(validate(&schema, &json!({ "age": 42 })).is_err());
        assert!(!is_valid(&schema, &json!({ "age": 42 })));
    }
}
