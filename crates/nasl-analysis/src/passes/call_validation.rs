//! Pass 3: resolve every call site or prove the miss harmless.
//!
//! A call whose target is neither a builtin nor a registered function is
//! not automatically an error: if it only ever runs inside dead code, the
//! interpreter will never reach it. The reverse-reachability search on the
//! recorded caller chain makes that distinction — reaching the top-level
//! file means the call can actually fire, and the script is rejected.
//!
//! Two side duties mirror the execution engine's behavior: a call that
//! resolves into a tracked include file marks it used, and a call to the
//! reflective `defined_func` builtin arms a one-shot flag so the probed
//! name (the next string constant) registers as known rather than
//! undefined.

use nasl_core::diagnostics::{Diagnostic, DiagnosticSink};
use nasl_core::error::LintError;
use nasl_core::tree::{NodeKind, SyntaxNode};
use tracing::trace;

use crate::context::LintContext;
use crate::walker::{Flow, Visitor};

/// The runtime's function-existence probe.
const PROBE_BUILTIN: &str = "defined_func";

/// The call-validation pass.
pub struct CallValidationPass<'a, 'run> {
    ctx: &'run mut LintContext<'a>,
    sink: &'run mut dyn DiagnosticSink,
    /// Armed by a `defined_func` call, consumed by the next string constant.
    probe_armed: bool,
}

impl<'a, 'run> CallValidationPass<'a, 'run> {
    /// Create the pass over `ctx`.
    pub fn new(ctx: &'run mut LintContext<'a>, sink: &'run mut dyn DiagnosticSink) -> Self {
        Self {
            ctx,
            sink,
            probe_armed: false,
        }
    }

    fn visit_call(&mut self, node: &'a SyntaxNode<'a>) -> Result<(), LintError> {
        let Some(name) = node.value() else {
            return Ok(());
        };

        if !self.ctx.resolves(name) {
            let reachable = self
                .ctx
                .latest_site(name)
                .is_some_and(|site| self.ctx.reverse_reachable(site));
            if reachable {
                let file = self.ctx.call_file(name).unwrap_or(self.ctx.top_file());
                self.sink.report(Diagnostic::at(
                    file,
                    node.line(),
                    format!("undefined function '{name}'"),
                ));
                return Err(LintError::UndefinedFunction {
                    function: name.into(),
                    file: file.into(),
                    line: node.line(),
                });
            }
            trace!(function = name, "unresolved call only reachable from dead code");
        }

        if let Some(file) = self.ctx.owning_file(name) {
            self.ctx.mark_include_used(file);
        }
        if name == PROBE_BUILTIN {
            self.probe_armed = true;
        }
        Ok(())
    }
}

impl<'a> Visitor<'a> for CallValidationPass<'a, '_> {
    fn enter(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        match node.kind() {
            NodeKind::FunctionDef => {
                let Some(name) = node.value() else {
                    return Ok(Flow::Skip);
                };
                if !self.ctx.is_called(name) {
                    return Ok(Flow::Skip);
                }
                Ok(Flow::Continue)
            }
            NodeKind::Constant => {
                if self.probe_armed {
                    if let Some(probed) = node.value() {
                        self.ctx.register_probe(probed, node.line());
                        self.probe_armed = false;
                    }
                }
                Ok(Flow::Continue)
            }
            NodeKind::Call => {
                self.visit_call(node)?;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }
}
