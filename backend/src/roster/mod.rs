//! JMRI roster document normalization.
//!
//! One roster XML document describes one locomotive. The stages run
//! leaf-first:
//!
//! ```text
//! XML ─▶ document (extract) ─▶ decoder / project ─▶ functions ─▶ cv ─▶ classify ─▶ normalize
//! ```
//!
//! - `document`: typed projection of the locomotive node
//! - `decoder`: decoder brand and project (sound profile) name
//! - `functions`: function / sound label merge
//! - `cv`: curated CV whitelist
//! - `classify`: ordered locomotive type rules
//! - `normalize`: canonical [`crate::models::LocomotiveRecord`]

pub mod classify;
pub mod cv;
pub mod decoder;
pub mod document;
pub mod functions;
pub mod normalize;

pub use classify::classify;
pub use cv::{filter_cvs, CV_WHITELIST};
pub use decoder::{decode_packed_name, resolve_decoder, resolve_project, sound_project_label, ProjectInfo};
pub use document::{extract_locomotive, RosterLocomotive};
pub use functions::merge_labels;
pub use normalize::{normalize, normalize_document};
