//! actorgen-core: actor state-table compiler core library.
//!
//! Compiles a line-oriented actor definition script (animation states
//! plus per-type attribute overrides) into a resolved model consumed by
//! the `actorgen-codegen` emitters.
//!
//! Pipeline: lexical scan -> schema derivation -> block/state parse ->
//! reference resolution -> field classification. The floating rewrite of
//! fixed-point expressions is applied per value at emission time via
//! [`rewrite::rewrite_fixed_expr`].
//!
//! # Public API
//!
//! Key types are re-exported at the crate root:
//!
//! - [`compile_source()`] / [`compile_file()`] -- run the full pipeline
//! - [`ActorModel`] -- the resolved model handed to emitters
//! - [`CompileError`] -- the single pipeline error type
//! - Model types: [`Field`], [`Schema`], [`State`], [`TypeRecord`],
//!   [`Repr`], [`NameTable`]
//!
//! Individual pass entry functions remain available in their modules for
//! selective execution and testing.

pub mod classify;
pub mod compile;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod rewrite;
pub mod schema;
pub mod serialize;
pub mod tables;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::CompileError;
pub use model::{ActorModel, Field, Repr, Schema, State, TypeRecord};
pub use tables::NameTable;

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use compile::{compile_file, compile_source};
pub use rewrite::rewrite_fixed_expr;
pub use serialize::serialize;
