//! Field representation classification.
//!
//! Runs after all type records exist: the float promotion is a property
//! of the whole model, not of a single (type, field) pair, because the
//! generated record layout must be uniformly typed across every record.

use crate::model::{Repr, Schema, TypeRecord};
use crate::rewrite::expr_uses_unit;

/// Name heuristic: the field stores a sound reference.
pub fn is_sound_field(name: &str) -> bool {
    name.to_ascii_lowercase().contains("sound")
}

/// Name heuristic: the field stores a bitmask. The substring rule
/// subsumes the exact-match and `_flags`-suffix forms.
pub fn is_flags_field(name: &str) -> bool {
    name.to_ascii_lowercase().contains("flags")
}

/// Per field: whether the unit token occurs anywhere across the default
/// expression and every type's override for that field. A single usage
/// anywhere promotes the field for all types. String fields are skipped;
/// their values are never numeric.
pub fn field_unit_usage(schema: &Schema, types: &[TypeRecord]) -> Vec<bool> {
    let mut uses: Vec<bool> = schema
        .fields()
        .iter()
        .map(|f| !f.is_string && expr_uses_unit(&f.default))
        .collect();

    for t in types {
        for (i, slot) in t.overrides.iter().enumerate() {
            if schema.fields()[i].is_string {
                continue;
            }
            if let Some(expr) = slot {
                if expr_uses_unit(expr) {
                    uses[i] = true;
                }
            }
        }
    }
    uses
}

/// Decide each field's emission representation.
///
/// Precedence when a name satisfies more than one heuristic: the string
/// prefix wins over everything, sound wins over flags, flags wins over
/// the float promotion.
pub fn classify_fields(schema: &Schema, uses_unit: &[bool]) -> Vec<Repr> {
    schema
        .fields()
        .iter()
        .zip(uses_unit)
        .map(|(f, &unit)| {
            if f.is_string {
                Repr::Text
            } else if is_sound_field(&f.name) {
                Repr::Sound
            } else if is_flags_field(&f.name) {
                Repr::Flags
            } else if unit {
                Repr::Float
            } else {
                Repr::Int
            }
        })
        .collect()
}
