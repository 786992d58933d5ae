//! Domain models for the Railcat import pipeline.
//!
//! This module contains the canonical record shapes produced by the importers:
//!
//! - [`LocomotiveRecord`] - Normalized locomotive (roster or CSV import)
//! - [`RollingStockRecord`] - Wagon / coach (CSV import)
//! - [`FunctionMapping`] - F0..F28 output description
//! - [`CVModification`] - Curated configuration-variable value
//! - [`DecoderDescriptor`] - Decoder identity derived from a roster document
//! - [`AuditEvent`] - History entry appended after a successful batch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Locomotive Type
// =============================================================================

/// Category tag of a locomotive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocomotiveType {
    /// Electric locomotive. Default for manually entered records.
    #[default]
    Electrica,
    /// Steam locomotive.
    Vapor,
    /// Diesel locomotive.
    Diesel,
    /// Multiple unit / railcar.
    Automotor,
    /// High-speed trainset.
    AltaVelocidad,
    /// Anything else.
    Otro,
}

impl LocomotiveType {
    /// Parse the wire tag (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "electrica" => Some(Self::Electrica),
            "vapor" => Some(Self::Vapor),
            "diesel" => Some(Self::Diesel),
            "automotor" => Some(Self::Automotor),
            "alta_velocidad" => Some(Self::AltaVelocidad),
            "otro" => Some(Self::Otro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electrica => "electrica",
            Self::Vapor => "vapor",
            Self::Diesel => "diesel",
            Self::Automotor => "automotor",
            Self::AltaVelocidad => "alta_velocidad",
            Self::Otro => "otro",
        }
    }
}

// =============================================================================
// Rolling Stock Type
// =============================================================================

/// Category tag of a wagon or coach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockType {
    /// Freight wagon.
    #[default]
    VagonMercancias,
    /// Passenger coach.
    CocheViajeros,
    /// Van.
    Furgon,
    /// Anything else.
    Otro,
}

impl StockType {
    /// Parse the wire tag (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "vagon_mercancias" => Some(Self::VagonMercancias),
            "coche_viajeros" => Some(Self::CocheViajeros),
            "furgon" => Some(Self::Furgon),
            "otro" => Some(Self::Otro),
            _ => None,
        }
    }
}

// =============================================================================
// Condition
// =============================================================================

/// Physical condition of a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Nuevo,
    Usado,
    Restaurado,
}

impl Condition {
    /// Parse the wire tag (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "nuevo" => Some(Self::Nuevo),
            "usado" => Some(Self::Usado),
            "restaurado" => Some(Self::Restaurado),
            _ => None,
        }
    }
}

// =============================================================================
// Decoder, Functions, CVs
// =============================================================================

/// Decoder identity read from a roster document.
///
/// `brand` is derived from `family_raw` and never authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecoderDescriptor {
    pub brand: String,
    pub model: String,
    pub family_raw: String,
}

/// One numbered decoder output and what it does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionMapping {
    /// "F0".."F28"
    pub function_number: String,
    pub description: String,
    #[serde(default)]
    pub is_sound: bool,
}

/// A curated configuration-variable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CVModification {
    pub cv_number: u32,
    pub value: i64,
    pub description: String,
}

// =============================================================================
// Locomotive
// =============================================================================

/// Canonical locomotive record.
///
/// Built fresh per successful import; ownership passes straight to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocomotiveRecord {
    pub brand: String,
    pub model: String,
    pub reference: String,
    #[serde(default)]
    pub locomotive_type: LocomotiveType,
    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub prototype_type: String,
    pub dcc_address: u32,
    #[serde(default)]
    pub decoder_brand: String,
    #[serde(default)]
    pub decoder_model: String,
    #[serde(default)]
    pub sound_project: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub railway_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub functions: Vec<FunctionMapping>,
    #[serde(default)]
    pub cv_modifications: Vec<CVModification>,
}

impl LocomotiveRecord {
    /// Create a record with the identifying fields and defaults elsewhere.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, dcc_address: u32) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            reference: String::new(),
            locomotive_type: LocomotiveType::default(),
            registration_number: String::new(),
            prototype_type: String::new(),
            dcc_address,
            decoder_brand: String::new(),
            decoder_model: String::new(),
            sound_project: String::new(),
            notes: String::new(),
            condition: Condition::default(),
            era: None,
            railway_company: None,
            purchase_date: None,
            price: None,
            functions: Vec::new(),
            cv_modifications: Vec::new(),
        }
    }
}

// =============================================================================
// Rolling Stock
// =============================================================================

/// Canonical wagon / coach record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollingStockRecord {
    pub brand: String,
    pub model: String,
    pub reference: String,
    #[serde(default)]
    pub stock_type: StockType,
    #[serde(default)]
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub railway_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

// =============================================================================
// Catalog Record
// =============================================================================

/// Anything the importers hand to the store.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CatalogRecord {
    Locomotive(LocomotiveRecord),
    RollingStock(RollingStockRecord),
}

impl CatalogRecord {
    /// Collection name the record belongs to.
    pub fn collection(&self) -> &'static str {
        match self {
            CatalogRecord::Locomotive(_) => "locomotives",
            CatalogRecord::RollingStock(_) => "rolling_stock",
        }
    }
}

// =============================================================================
// Audit Event
// =============================================================================

/// Kind of batch that produced an audit event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    XmlImport,
    CsvImport,
}

/// History entry appended once per batch with at least one import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: AuditEventType,
    #[serde(default)]
    pub locomotives_count: usize,
    #[serde(default)]
    pub rolling_stock_count: usize,
    #[serde(default)]
    pub decoders_count: usize,
    #[serde(default)]
    pub sound_projects_count: usize,
    #[serde(default)]
    pub skipped_count: usize,
}

impl AuditEvent {
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            event_type,
            locomotives_count: 0,
            rolling_stock_count: 0,
            decoders_count: 0,
            sound_projects_count: 0,
            skipped_count: 0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
