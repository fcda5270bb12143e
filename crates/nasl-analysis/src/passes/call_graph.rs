//! Pass 1: collect every function name invoked anywhere in the tree.
//!
//! The called-function set gates the later passes: definitions whose names
//! never appear in it are dead code and are not analyzed further. Builtins
//! are resolved by the runtime and never enter the set. Membership is
//! existence-only; the pass itself can never reject a script.

use nasl_core::error::LintError;
use nasl_core::tree::{NodeKind, SyntaxNode};

use crate::context::LintContext;
use crate::walker::{Flow, Visitor};

/// Builds [`LintContext`]'s called-function set.
pub struct CallGraphPass<'a, 'run> {
    ctx: &'run mut LintContext<'a>,
}

impl<'a, 'run> CallGraphPass<'a, 'run> {
    /// Create the pass over `ctx`.
    pub fn new(ctx: &'run mut LintContext<'a>) -> Self {
        Self { ctx }
    }
}

impl<'a> Visitor<'a> for CallGraphPass<'a, '_> {
    fn enter(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        if node.kind() == NodeKind::Call {
            if let Some(name) = node.value() {
                if !self.ctx.is_builtin(name) {
                    self.ctx.mark_called(name);
                }
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::walk;
    use bumpalo::Bump;
    use nasl_core::registry::{BuiltinTable, IncludeMap};
    use nasl_core::tree::TreeBuilder;

    #[test]
    fn collects_calls_everywhere_but_skips_builtins() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        // display("x"); function dead() { helper(); } helper();
        let display = b.call("display", None, 1);
        let helper_inside = b.call("helper", None, 2);
        let dead = b.function_def("dead", None, Some(helper_inside), 2);
        let probe = b.call("probe", None, 3);
        let root = b.sequence(&[display, dead, probe]).unwrap();

        let builtins = BuiltinTable::with_names(["display"]);
        let includes = IncludeMap::new();
        let mut ctx = LintContext::new("scan.nasl", &builtins, &includes);
        walk(root, &mut CallGraphPass::new(&mut ctx)).unwrap();

        assert!(ctx.is_called("helper")); // even though only dead code calls it
        assert!(ctx.is_called("probe"));
        assert!(!ctx.is_called("display"));
        assert_eq!(ctx.called_count(), 2);
    }
}
