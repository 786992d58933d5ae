//! Assemble a [`LocomotiveRecord`] from one roster document.

use super::classify::classify;
use super::cv::filter_cvs;
use super::decoder::{resolve_decoder, resolve_project, sound_project_label};
use super::document::{extract_locomotive, RosterLocomotive};
use super::functions::merge_labels;
use crate::error::{ItemError, ItemResult};
use crate::models::LocomotiveRecord;

/// Parse, extract and normalize one raw roster document.
///
/// A well-formed document without a locomotive node yields
/// [`ItemError::RecordNotFound`].
pub fn normalize_document(xml: &str) -> ItemResult<LocomotiveRecord> {
    let loco = extract_locomotive(xml)?.ok_or(ItemError::RecordNotFound)?;
    Ok(normalize(loco))
}

/// Map the extracted roster fields onto the canonical shape.
///
/// `roadName` becomes `model` (falling back to the project name) and the
/// roster's own `model` attribute becomes `reference`.
pub fn normalize(loco: RosterLocomotive) -> LocomotiveRecord {
    let decoder = resolve_decoder(loco.decoder.as_ref());
    let project = resolve_project(&loco.var_values, &loco.cv_values);
    let project_name = project.name.clone().unwrap_or_default();

    let model = if loco.road_name.is_empty() {
        project_name.clone()
    } else {
        loco.road_name
    };

    let locomotive_type = classify(&model, &project_name);
    let sound_project = sound_project_label(&decoder, project.name.as_deref());
    let prototype_type = project
        .project_type
        .unwrap_or_else(|| project_name.clone());

    let mut record = LocomotiveRecord::new(loco.manufacturer, model, loco.dcc_address);
    record.reference = loco.model_name;
    record.locomotive_type = locomotive_type;
    record.registration_number = loco.road_number;
    record.prototype_type = prototype_type;
    record.decoder_brand = decoder.brand;
    record.decoder_model = decoder.model;
    record.sound_project = sound_project;
    record.notes = loco.comment;
    record.functions = merge_labels(&loco.function_labels, &loco.sound_labels);
    record.cv_modifications = filter_cvs(&loco.cv_values);
    record
}
