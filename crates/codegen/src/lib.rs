//! actorgen-codegen: C artifact generation.
//!
//! Consumes the resolved [`ActorModel`] (never the raw token stream) and
//! writes the two artifacts the runtime links against: a declarative
//! header (`info.h` -- enumerations and the record layout) and the
//! literal initializer tables (`info.c`). The core makes no assumption
//! about output syntax; everything C-specific lives here.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use actorgen_core::ActorModel;

mod header;
mod tables;

pub use header::render_header;
pub use tables::render_tables;

/// Error type for code generation operations.
#[derive(Debug, Clone)]
pub enum CodegenError {
    /// An I/O error occurred while writing generated files.
    Io(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for CodegenError {}

/// Output configuration for C generation.
#[derive(Debug, Clone)]
pub struct CConfig {
    /// Directory the artifacts are written into; created if missing.
    pub out_dir: PathBuf,
}

/// Paths of the written artifacts.
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub header: PathBuf,
    pub tables: PathBuf,
}

/// Render and write both artifacts. Nothing is written until the whole
/// model has rendered, so a failure leaves no partial pair behind.
pub fn generate_c(model: &ActorModel, config: &CConfig) -> Result<GeneratedFiles, CodegenError> {
    let header_text = header::render_header(model);
    let tables_text = tables::render_tables(model);

    fs::create_dir_all(&config.out_dir)
        .map_err(|e| CodegenError::Io(format!("creating {}: {}", config.out_dir.display(), e)))?;

    let header = config.out_dir.join("info.h");
    fs::write(&header, header_text)
        .map_err(|e| CodegenError::Io(format!("writing {}: {}", header.display(), e)))?;

    let tables = config.out_dir.join("info.c");
    fs::write(&tables, tables_text)
        .map_err(|e| CodegenError::Io(format!("writing {}: {}", tables.display(), e)))?;

    Ok(GeneratedFiles { header, tables })
}

/// Sanitize a source name into a C identifier: every character outside
/// `[A-Za-z0-9_]` becomes `_`, an empty result becomes `X`, and a
/// leading digit gets a `_` prefix.
pub fn c_ident(name: &str) -> String {
    let mut s: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();
    if s.is_empty() {
        s.push('X');
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, '_');
    }
    s
}
