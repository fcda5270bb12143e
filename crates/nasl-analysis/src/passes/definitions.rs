//! Pass 2/5: register function definitions and record call sites.
//!
//! One traversal engine, two modes:
//!
//! - [`Mode::Reachability`] registers every *called* definition, switches
//!   the active filename to the definition's owning file for the duration
//!   of its subtree, records a call site for every call expression, and
//!   rejects calls that pass the same named parameter twice. Definitions
//!   nothing ever calls are skipped wholesale.
//! - [`Mode::DuplicateCheck`] visits every definition, called or not, and
//!   rejects the script on the second occurrence of a name. It keeps its
//!   own registration table and does no call bookkeeping.

use nasl_core::diagnostics::{Diagnostic, DiagnosticSink};
use nasl_core::error::LintError;
use nasl_core::tree::{NodeKind, SyntaxNode};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::context::{FunctionRecord, LintContext};
use crate::walker::{Flow, Visitor};

/// Which of the two definition traversals to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Register called definitions, record call sites, check parameters.
    Reachability,
    /// Detect a function name defined more than once.
    DuplicateCheck,
}

/// A definition subtree currently being traversed.
struct ActiveDef<'a> {
    function: &'a str,
    previous_file: &'a str,
}

/// The function-definition pass.
pub struct DefinitionPass<'a, 'run> {
    ctx: &'run mut LintContext<'a>,
    sink: &'run mut dyn DiagnosticSink,
    mode: Mode,
    /// Stack of enclosing definitions (reachability mode).
    active: Vec<ActiveDef<'a>>,
    /// Names already defined (duplicate-check mode).
    seen: FxHashMap<&'a str, u32>,
}

impl<'a, 'run> DefinitionPass<'a, 'run> {
    /// Create the pass over `ctx` in the given mode.
    pub fn new(
        ctx: &'run mut LintContext<'a>,
        sink: &'run mut dyn DiagnosticSink,
        mode: Mode,
    ) -> Self {
        Self {
            ctx,
            sink,
            mode,
            active: Vec::new(),
            seen: FxHashMap::default(),
        }
    }

    fn visit_call(&mut self, node: &'a SyntaxNode<'a>) -> Result<(), LintError> {
        let Some(name) = node.value() else {
            return Ok(());
        };
        if !self.ctx.resolves(name) {
            self.ctx.note_call_file(name);
        }
        let caller = self.active.last().map(|def| def.function);
        self.ctx.record_call_site(name, caller, node.line());
        self.check_duplicate_params(node, name)
    }

    /// Reject a repeated parameter name within one call's argument list.
    fn check_duplicate_params(
        &mut self,
        call: &'a SyntaxNode<'a>,
        function: &'a str,
    ) -> Result<(), LintError> {
        let mut seen: FxHashSet<&'a str> = FxHashSet::default();
        let mut arg = call.child(0);
        while let Some(node) = arg {
            if let Some(param) = node.value() {
                if !seen.insert(param) {
                    let file = self.ctx.current_file();
                    self.sink.report(Diagnostic::at(
                        file,
                        call.line(),
                        format!(
                            "parameter '{param}' passed to function '{function}' \
                             was provided multiple times"
                        ),
                    ));
                    return Err(LintError::DuplicateCallParameter {
                        function: function.into(),
                        parameter: param.into(),
                        file: file.into(),
                        line: call.line(),
                    });
                }
            }
            arg = node.child(1);
        }
        Ok(())
    }

    fn enter_definition(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        let Some(name) = node.value() else {
            return Ok(Flow::Skip);
        };
        // Attribute the definition to its file before the reachability
        // gate, so an include whose functions are never invoked at all
        // still shows up in the usage report.
        let file = self.ctx.owning_file(name).unwrap_or(self.ctx.top_file());
        self.ctx.track_include(file);
        if !self.ctx.is_called(name) {
            trace!(function = name, "definition never called, skipping");
            return Ok(Flow::Skip);
        }

        let mut params = Vec::new();
        let mut decl = node.child(0);
        while let Some(p) = decl {
            if let Some(param) = p.value() {
                params.push(param);
            }
            decl = p.child(1);
        }
        self.ctx.register_function(FunctionRecord {
            name,
            declared: true,
            params,
            line: node.line(),
        });

        let previous_file = self.ctx.swap_current_file(file);
        self.active.push(ActiveDef {
            function: name,
            previous_file,
        });
        Ok(Flow::Continue)
    }

    fn check_duplicate_definition(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        let Some(name) = node.value() else {
            return Ok(Flow::Skip);
        };
        if self.seen.insert(name, node.line()).is_some() {
            let file = self.ctx.owning_file(name).unwrap_or(self.ctx.top_file());
            self.sink.report(Diagnostic::at(
                file,
                node.line(),
                format!("function '{name}' is defined more than once"),
            ));
            return Err(LintError::DuplicateFunctionDefinition {
                function: name.into(),
                file: file.into(),
                line: node.line(),
            });
        }
        // Definition bodies hold no further definitions; nothing else in
        // this mode cares about their contents.
        Ok(Flow::Skip)
    }
}

impl<'a> Visitor<'a> for DefinitionPass<'a, '_> {
    fn enter(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        match node.kind() {
            NodeKind::Call if self.mode == Mode::Reachability => {
                self.visit_call(node)?;
                Ok(Flow::Continue)
            }
            NodeKind::FunctionDef => match self.mode {
                Mode::Reachability => self.enter_definition(node),
                Mode::DuplicateCheck => self.check_duplicate_definition(node),
            },
            _ => Ok(Flow::Continue),
        }
    }

    fn leave(&mut self, node: &'a SyntaxNode<'a>) -> Result<(), LintError> {
        if node.kind() == NodeKind::FunctionDef && self.mode == Mode::Reachability {
            if let Some(def) = self.active.pop() {
                self.ctx.swap_current_file(def.previous_file);
            }
        }
        Ok(())
    }
}
