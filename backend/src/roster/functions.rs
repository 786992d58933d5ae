//! Merge function labels and sound labels into one ordered mapping list.

use super::document::{FunctionLabel, SoundLabel};
use crate::models::FunctionMapping;

/// Build the function mappings of a locomotive.
///
/// Function labels come first in document order (`is_sound = false`). Each
/// sound label then either flags the existing entry with the same number or
/// is appended as a sound-only entry. Numbers stay unique.
pub fn merge_labels(functions: &[FunctionLabel], sounds: &[SoundLabel]) -> Vec<FunctionMapping> {
    let mut merged: Vec<FunctionMapping> = Vec::with_capacity(functions.len() + sounds.len());

    for label in functions {
        let (Some(number), Some(text)) = (function_number(&label.num), non_empty(&label.text)) else {
            continue;
        };
        if merged.iter().any(|m| m.function_number == number) {
            continue;
        }
        merged.push(FunctionMapping {
            function_number: number,
            description: text.to_string(),
            is_sound: false,
        });
    }

    for label in sounds {
        let Some(number) = function_number(&label.num) else {
            continue;
        };
        if let Some(existing) = merged.iter_mut().find(|m| m.function_number == number) {
            existing.is_sound = true;
            continue;
        }
        if let Some(text) = non_empty(&label.text) {
            merged.push(FunctionMapping {
                function_number: number,
                description: text.to_string(),
                is_sound: true,
            });
        }
    }

    merged
}

/// `"5"` → `"F5"`; also accepts an already prefixed `"F5"`.
/// Anything that is not a plain function number (`"Shift"`) yields `None`.
fn function_number(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix('F')
        .or_else(|| raw.strip_prefix('f'))
        .unwrap_or(raw);
    non_empty(digits)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .map(|d| format!("F{}", d))
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
