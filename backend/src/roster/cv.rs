//! Curated configuration-variable filter.

use super::document::CvValue;
use crate::models::CVModification;

/// CVs worth keeping on a locomotive record, with their descriptions.
pub const CV_WHITELIST: &[(u32, &str)] = &[
    (1, "Dirección corta"),
    (2, "Vstart"),
    (3, "Aceleración"),
    (4, "Deceleración"),
    (5, "Vmax"),
    (6, "Vmedia"),
    (17, "Dirección larga (alta)"),
    (18, "Dirección larga (baja)"),
    (29, "Configuración"),
];

/// Description of a whitelisted CV.
pub fn cv_description(cv_number: u32) -> Option<&'static str> {
    CV_WHITELIST
        .iter()
        .find(|(n, _)| *n == cv_number)
        .map(|(_, description)| *description)
}

/// Keep simple, whitelisted CVs with numeric values, in document order.
///
/// Indexed CVs (`16.2.5`), unknown CVs and non-numeric pairs are dropped.
/// Signed values such as `-1` or `+5` are kept.
pub fn filter_cvs(values: &[CvValue]) -> Vec<CVModification> {
    values
        .iter()
        .filter(|cv| !cv.name.is_empty() && !cv.name.contains('.'))
        .filter_map(|cv| {
            let cv_number: u32 = cv.name.trim().parse().ok()?;
            let description = cv_description(cv_number)?;
            let value: i64 = cv.value.trim().parse().ok()?;
            Some(CVModification {
                cv_number,
                value,
                description: description.to_string(),
            })
        })
        .collect()
}
