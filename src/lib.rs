//! NASL script linter.
//!
//! Facade crate re-exporting the syntax-tree and collaborator types from
//! `nasl-core` and the analyzer from `nasl-analysis`. The scheduling layer
//! calls [`Linter::run`] on a parsed script before admitting it for
//! execution; the script is rejected outright on any of the five fatal
//! findings.
//!
//! ```
//! use bumpalo::Bump;
//! use nasl_lint::{BuiltinTable, Diagnostics, IncludeMap, Linter, TreeBuilder};
//!
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//! // script_name("demo");
//! let name = b.string("demo", 1);
//! let call = b.call("script_name", b.arguments(&[name], 1), 1);
//! let script = b.sequence(&[call]).unwrap();
//!
//! let builtins = BuiltinTable::with_names(["script_name"]);
//! let includes = IncludeMap::new();
//! let mut diagnostics = Diagnostics::new();
//!
//! let verdict = Linter::new(&builtins, &includes).run(script, "demo.nasl", &mut diagnostics);
//! assert!(verdict.is_ok());
//! assert!(diagnostics.is_empty());
//! ```

pub use nasl_analysis::{CallSite, FunctionRecord, Linter, LintContext};
pub use nasl_core::{
    BuiltinRegistry, BuiltinTable, Diagnostic, DiagnosticSink, Diagnostics, IncludeMap,
    IncludeResolver, LintError, NodeKind, SyntaxNode, TreeBuilder,
};
