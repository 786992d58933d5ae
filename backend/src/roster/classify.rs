//! Heuristic locomotive type classifier.
//!
//! Rules are evaluated top to bottom and the first match wins. The table
//! overlaps on purpose: "ave" and "alta velocidad" are caught by the electric
//! rule, so the high-speed rule only fires for its remaining needles.

use crate::models::LocomotiveType;

/// Ordered `(needles, tag)` rule table.
pub const RULES: &[(&[&str], LocomotiveType)] = &[
    (
        &["electric", "eléctric", "252", "269", "251", "ave", "alta velocidad"],
        LocomotiveType::Electrica,
    ),
    (
        &["vapor", "steam", "141", "240", "030"],
        LocomotiveType::Vapor,
    ),
    (
        &["automotor", "dmu", "emu", "592", "594", "596", "ferrobus"],
        LocomotiveType::Automotor,
    ),
    (
        &["ave", "s-100", "s-102", "s-103", "talgo", "alta velocidad"],
        LocomotiveType::AltaVelocidad,
    ),
];

/// Tag used when no rule matches.
pub const DEFAULT_TYPE: LocomotiveType = LocomotiveType::Diesel;

/// Classify from the canonical model name and the project name.
pub fn classify(model: &str, project_name: &str) -> LocomotiveType {
    let haystack = format!("{} {}", model, project_name).to_lowercase();

    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| haystack.contains(n)))
        .map(|(_, tag)| *tag)
        .unwrap_or(DEFAULT_TYPE)
}
