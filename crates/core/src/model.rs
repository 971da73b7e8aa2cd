//! Shared model types for the actor-table compiler.
//!
//! These types are produced by the parsing and resolution passes and
//! consumed by classification, serialization, and the codegen crate.
//! They live here so that pass modules can import them without
//! depending on each other.

use std::collections::HashMap;

use crate::tables::NameTable;

// ──────────────────────────────────────────────
// Input-format constants
// ──────────────────────────────────────────────

/// `;` starts a comment running to end of line.
pub const COMMENT_CHAR: char = ';';
/// `$` opens the header block and every type block.
pub const BLOCK_MARKER: &str = "$";
/// Keyword of the mandatory leading header block: `$ DEFAULT`.
pub const DEFAULT_KEYWORD: &str = "DEFAULT";
/// `$ +` opens an anonymous type block; a placeholder name is synthesized.
pub const ANON_MARKER: &str = "+";
/// Prefix of synthesized placeholder type names (`MT_MISC0`, `MT_MISC1`, ...).
pub const ANON_TYPE_PREFIX: &str = "MT_MISC";
/// Every state name carries this prefix; it is how state lines are recognized.
pub const STATE_PREFIX: &str = "S_";
/// Fields with this name prefix hold string values.
pub const STRING_PREFIX: &str = "str_";
/// Trailing marker on a frame or tics token that sets the fullbright flag.
pub const FULLBRIGHT_MARKER: char = '*';
/// Bit OR'd into the frame ordinal when fullbright is set.
pub const FULLBRIGHT_BIT: i32 = 0x8000;
/// The fixed-point unit constant; rewritten to `1.0f` for float fields.
pub const UNIT_TOKEN: &str = "FRACUNIT";
/// Name of the reserved "no action" entry at action-table ordinal 0.
pub const NO_ACTION_NAME: &str = "NULL";

// ──────────────────────────────────────────────
// Schema
// ──────────────────────────────────────────────

/// One field of the record layout, declared in the header block.
/// Order of declaration defines the ordinal layout of the output record
/// and the column order of every override row.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Default value expression, joined token text, never evaluated.
    pub default: String,
    /// True iff the name carries the string prefix, independent of the
    /// default value's shape.
    pub is_string: bool,
}

/// The ordered field list plus a name-to-ordinal index.
/// Built once from the header block and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from an ordered field list.
    /// The caller guarantees names are unique; later duplicates would
    /// silently shadow earlier ordinals in the index otherwise.
    pub(crate) fn from_fields(fields: Vec<Field>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Schema { fields, index }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Ordinal of a field by exact (case-sensitive) name.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ──────────────────────────────────────────────
// Types and states
// ──────────────────────────────────────────────

/// A named group of field overrides layered on top of the schema defaults.
#[derive(Debug, Clone)]
pub struct TypeRecord {
    pub name: String,
    /// One slot per schema field, column-aligned to field ordinals:
    /// `None` inherits the default, `Some` is an explicit expression.
    pub overrides: Vec<Option<String>>,
}

impl TypeRecord {
    pub fn new(name: String, field_count: usize) -> Self {
        TypeRecord {
            name,
            overrides: vec![None; field_count],
        }
    }
}

/// A state as parsed, with the next-state reference still symbolic.
/// Declaration order is the structural ordinal used by all cross-references.
#[derive(Debug, Clone)]
pub struct RawState {
    pub name: String,
    pub sprite: usize,
    /// Frame ordinal, with the fullbright bit OR'd in when set.
    pub frame: i32,
    /// Negative values are a pass-through sentinel meaning "no tic advance".
    pub tics: i32,
    pub action: usize,
    pub next_name: String,
    pub misc1: i32,
    pub misc2: i32,
}

/// A state after reference resolution: `next` indexes the state list.
#[derive(Debug, Clone)]
pub struct State {
    pub name: String,
    pub sprite: usize,
    pub frame: i32,
    pub tics: i32,
    pub action: usize,
    pub next: usize,
    pub misc1: i32,
    pub misc2: i32,
}

// ──────────────────────────────────────────────
// Field representation
// ──────────────────────────────────────────────

/// Emission representation of a field, derived by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repr {
    /// String-prefixed field: emitted verbatim as a string value.
    Text,
    /// Sound field: integer, forced to literal zero regardless of value.
    Sound,
    /// Flags field: integer, value passed through unrewritten.
    Flags,
    /// Numeric field promoted to floating form by unit-token usage.
    Float,
    /// Plain integer field.
    Int,
}

impl Repr {
    pub fn as_str(self) -> &'static str {
        match self {
            Repr::Text => "text",
            Repr::Sound => "sound",
            Repr::Flags => "flags",
            Repr::Float => "float",
            Repr::Int => "int",
        }
    }
}

// ──────────────────────────────────────────────
// Resolved model
// ──────────────────────────────────────────────

/// The fully resolved model: the only interface the core exposes to
/// emitters. All ordinals are zero-based first-appearance order.
#[derive(Debug)]
pub struct ActorModel {
    pub schema: Schema,
    pub sprites: NameTable,
    pub actions: NameTable,
    pub states: Vec<State>,
    pub types: Vec<TypeRecord>,
    /// Final representation per field, same order as the schema.
    pub reprs: Vec<Repr>,
    /// Per field: whether the unit token appears anywhere in the default
    /// or any type's override for that field.
    pub uses_unit: Vec<bool>,
}

impl ActorModel {
    /// The raw value for a (type, field) pair: the type's override if one
    /// was given, the schema default otherwise.
    pub fn value_for(&self, type_ord: usize, field_ord: usize) -> &str {
        match &self.types[type_ord].overrides[field_ord] {
            Some(expr) => expr,
            None => &self.schema.fields()[field_ord].default,
        }
    }
}
