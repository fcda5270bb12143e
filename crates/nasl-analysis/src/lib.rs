//! Multi-pass static analysis for NASL scripts.
//!
//! Before the scanning engine schedules a script for execution, [`Linter`]
//! walks its parsed syntax tree and rejects it if it calls undefined
//! functions, defines a function twice, passes a call parameter twice,
//! reads undeclared variables, or includes files it never uses.
//!
//! ## Pass order
//!
//! 1. Call graph — which names are invoked anywhere
//! 2. Definitions (reachability) — registrations, call sites, parameters
//! 3. Call validation — resolve or prove-dead every call
//! 4. Include usage — batched unused-include report
//! 5. Definitions (duplicate check) — every definition, called or not
//! 6. Variable scope — undeclared reads
//!
//! All mutable pass state lives in one [`LintContext`] owned by `run`, so
//! teardown on every exit path is just `Drop`; runs are independent and
//! the analyzer holds no process-wide state. The analysis itself is
//! single-threaded and synchronous: each traversal runs to completion or
//! short-circuits on the first fatal finding.
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use nasl_core::{BuiltinTable, Diagnostics, IncludeMap, TreeBuilder};
//! use nasl_analysis::Linter;
//!
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//! let script = b.sequence(&[b.call("display", None, 1)]).unwrap();
//!
//! let builtins = BuiltinTable::with_names(["display"]);
//! let includes = IncludeMap::new();
//! let mut diagnostics = Diagnostics::new();
//!
//! let verdict = Linter::new(&builtins, &includes)
//!     .run(script, "scan.nasl", &mut diagnostics);
//! assert!(verdict.is_ok());
//! ```

pub mod context;
pub mod passes;
pub mod walker;

pub use context::{CallSite, FunctionRecord, LintContext};
pub use walker::{walk, Flow, Visitor};

use nasl_core::diagnostics::DiagnosticSink;
use nasl_core::error::LintError;
use nasl_core::registry::{BuiltinRegistry, IncludeResolver};
use nasl_core::tree::SyntaxNode;
use tracing::debug;

use passes::{
    CallGraphPass, CallValidationPass, DefinitionPass, IncludeUsagePass, Mode, VariableScopePass,
};

/// The analyzer: holds the injected collaborators, sequences the passes.
pub struct Linter<'a> {
    builtins: &'a dyn BuiltinRegistry,
    includes: &'a dyn IncludeResolver,
}

impl<'a> Linter<'a> {
    /// Create a linter over the runtime's builtin registry and the include
    /// loader's attribution map.
    pub fn new(builtins: &'a dyn BuiltinRegistry, includes: &'a dyn IncludeResolver) -> Self {
        Self { builtins, includes }
    }

    /// Analyze one script.
    ///
    /// `tree` is the parsed syntax tree, `filename` the top-level script's
    /// own name. Diagnostics are written through `sink` as they are
    /// detected; the return value is the verdict. Deterministic: the same
    /// tree yields the same verdict and the same diagnostic sequence.
    pub fn run(
        &self,
        tree: &'a SyntaxNode<'a>,
        filename: &'a str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), LintError> {
        let mut ctx = LintContext::new(filename, self.builtins, self.includes);

        debug!(file = filename, "collecting called functions");
        walk(tree, &mut CallGraphPass::new(&mut ctx))?;
        debug!(called = ctx.called_count(), "registering definitions");
        walk(
            tree,
            &mut DefinitionPass::new(&mut ctx, &mut *sink, Mode::Reachability),
        )?;
        debug!(
            functions = ctx.function_count(),
            call_sites = ctx.call_sites().len(),
            "validating call sites"
        );
        walk(tree, &mut CallValidationPass::new(&mut ctx, &mut *sink))?;
        IncludeUsagePass::new(&ctx, &mut *sink).run()?;
        walk(
            tree,
            &mut DefinitionPass::new(&mut ctx, &mut *sink, Mode::DuplicateCheck),
        )?;
        debug!("checking variable scopes");
        walk(tree, &mut VariableScopePass::new(&mut ctx, &mut *sink))?;

        debug!(file = filename, "script accepted");
        Ok(())
    }
}
