//! Shared core types for the NASL script linter.
//!
//! This crate holds everything both the external collaborators (parser,
//! runtime, include loader) and the analyzer need to agree on:
//!
//! - [`tree`]: the arena-allocated syntax tree node type and its builder
//! - [`error`]: the five fatal analysis error kinds
//! - [`diagnostics`]: findings and the sink they are reported through
//! - [`registry`]: builtin-function and include-file resolution interfaces
//!
//! The analysis passes themselves live in the `nasl-analysis` crate.

pub mod diagnostics;
pub mod error;
pub mod registry;
pub mod tree;

pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
pub use error::LintError;
pub use registry::{BuiltinRegistry, BuiltinTable, IncludeMap, IncludeResolver};
pub use tree::{NodeKind, SyntaxNode, TreeBuilder, CHILD_SLOTS};
