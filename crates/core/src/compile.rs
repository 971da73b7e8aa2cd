//! Pipeline orchestrator: source text to resolved [`ActorModel`].
//!
//! A thin driver that calls each pass in order. All failures share the
//! single [`CompileError`] kind; the first error aborts the pipeline.

use std::path::Path;

use crate::classify;
use crate::error::CompileError;
use crate::lexer;
use crate::model::ActorModel;
use crate::parser;
use crate::resolve;
use crate::schema;

/// Compile a whole script to its resolved model.
pub fn compile_source(src: &str, filename: &str) -> Result<ActorModel, CompileError> {
    let lines = lexer::lex(src);

    // Header block: ordered field schema and defaults.
    let (schema, start) = schema::build_schema(&lines, filename)?;

    // Type blocks, states, assignments.
    let parsed = parser::parse_blocks(&lines, start, &schema, filename)?;

    // Next-state references, collect-then-resolve.
    let states = resolve::resolve_states(parsed.states, filename)?;

    // Global per-field classification, after all type records exist.
    let uses_unit = classify::field_unit_usage(&schema, &parsed.types);
    let reprs = classify::classify_fields(&schema, &uses_unit);

    Ok(ActorModel {
        schema,
        sprites: parsed.sprites,
        actions: parsed.actions,
        states,
        types: parsed.types,
        reprs,
        uses_unit,
    })
}

/// Compile a script file from disk.
pub fn compile_file(path: &Path) -> Result<ActorModel, CompileError> {
    let filename = path.display().to_string();
    let src = std::fs::read_to_string(path)
        .map_err(|e| CompileError::whole_file(&filename, format!("cannot read file: {}", e)))?;
    compile_source(&src, &filename)
}
