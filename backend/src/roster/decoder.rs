//! Decoder identity and project (sound profile) name resolution.

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{CvValue, DecoderNode, VarValue};
use crate::models::DecoderDescriptor;

/// `decoderDef` item holding the project name.
pub const PROJECT_NAME_ITEM: &str = "Project Loco Name";
/// `decoderDef` item holding the project type.
pub const PROJECT_TYPE_ITEM: &str = "Project Loco Type";

/// Index range of the CV slots that pack the project name, one byte each.
pub const PACKED_NAME_SLOTS: std::ops::RangeInclusive<u32> = 261..=288;

static PACKED_NAME_CV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1\.0\.(\d+)$").expect("static regex"));

/// Derive the decoder descriptor; brand is the first token of `family`.
pub fn resolve_decoder(node: Option<&DecoderNode>) -> DecoderDescriptor {
    let Some(node) = node else {
        return DecoderDescriptor::default();
    };

    let family_raw = node.family.clone().unwrap_or_default();
    let brand = family_raw
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    DecoderDescriptor {
        brand,
        model: node.model.clone().unwrap_or_default(),
        family_raw,
    }
}

/// Project name and type as found in a roster document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub project_type: Option<String>,
}

/// Resolve the project name: explicit `decoderDef` entries first, then the
/// packed ASCII encoding in CV slots `1.0.261`..`1.0.288`.
pub fn resolve_project(var_values: &[VarValue], cv_values: &[CvValue]) -> ProjectInfo {
    let lookup = |item: &str| {
        var_values
            .iter()
            .find(|v| v.item == item && !v.value.trim().is_empty())
            .map(|v| v.value.trim().to_string())
    };

    let name = lookup(PROJECT_NAME_ITEM).or_else(|| decode_packed_name(cv_values));

    ProjectInfo {
        name,
        project_type: lookup(PROJECT_TYPE_ITEM),
    }
}

/// Rebuild a name stored one character code per CV slot.
///
/// Slots are ordered by index; non-positive and non-byte codes are skipped.
/// Returns `None` when nothing printable remains after trimming.
pub fn decode_packed_name(cv_values: &[CvValue]) -> Option<String> {
    let mut slots: Vec<(u32, u8)> = cv_values
        .iter()
        .filter_map(|cv| {
            let index: u32 = PACKED_NAME_CV.captures(&cv.name)?.get(1)?.as_str().parse().ok()?;
            if !PACKED_NAME_SLOTS.contains(&index) {
                return None;
            }
            let code: i64 = cv.value.trim().parse().ok()?;
            let byte = u8::try_from(code).ok().filter(|b| *b > 0)?;
            Some((index, byte))
        })
        .collect();

    slots.sort_by_key(|(index, _)| *index);

    let decoded: String = slots.into_iter().map(|(_, byte)| char::from(byte)).collect();
    let trimmed = decoded.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Compose the sound-project label.
///
/// `"<brand> - <project>"` when both exist, else the project name, else the
/// raw decoder family, else empty.
pub fn sound_project_label(decoder: &DecoderDescriptor, project_name: Option<&str>) -> String {
    match project_name.filter(|p| !p.is_empty()) {
        Some(project) if !decoder.brand.is_empty() => format!("{} - {}", decoder.brand, project),
        Some(project) => project.to_string(),
        None => decoder.family_raw.clone(),
    }
}
