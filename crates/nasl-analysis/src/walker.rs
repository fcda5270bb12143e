//! Depth-first tree traversal over an explicit work stack.
//!
//! Every pass walks the tree the same way: depth-first, left-to-right over
//! the four child slots, visiting each node on the way down and (unless the
//! subtree was skipped) again on the way back up. The stack lives on the
//! heap, so a pathologically nested script cannot exhaust the call stack;
//! the original recursive-descent engine had no such bound.
//!
//! Failure short-circuits: the first `Err` from a visitor abandons the
//! remaining stack, so sibling subtrees at every enclosing level are never
//! visited.

use nasl_core::error::LintError;
use nasl_core::tree::SyntaxNode;

/// Visitor decision for a node's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Descend into the children, then call `leave`.
    Continue,
    /// Drop the whole subtree; `leave` is not called for this node.
    Skip,
}

/// Pass hooks invoked by [`walk`].
pub trait Visitor<'ast> {
    /// Called before a node's children, in source order.
    fn enter(&mut self, node: &'ast SyntaxNode<'ast>) -> Result<Flow, LintError>;

    /// Called after all of a node's children, unless `enter` skipped.
    fn leave(&mut self, _node: &'ast SyntaxNode<'ast>) -> Result<(), LintError> {
        Ok(())
    }
}

enum Event<'ast> {
    Enter(&'ast SyntaxNode<'ast>),
    Leave(&'ast SyntaxNode<'ast>),
}

/// Drive `visitor` over the tree rooted at `root`.
pub fn walk<'ast, V>(root: &'ast SyntaxNode<'ast>, visitor: &mut V) -> Result<(), LintError>
where
    V: Visitor<'ast> + ?Sized,
{
    let mut stack = vec![Event::Enter(root)];
    while let Some(event) = stack.pop() {
        match event {
            Event::Enter(node) => match visitor.enter(node)? {
                Flow::Skip => {}
                Flow::Continue => {
                    stack.push(Event::Leave(node));
                    // Reversed so child 0 is popped first.
                    for child in node.children().iter().rev().flatten() {
                        stack.push(Event::Enter(child));
                    }
                }
            },
            Event::Leave(node) => visitor.leave(node)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use nasl_core::tree::{NodeKind, TreeBuilder};

    /// Records the names of visited nodes, optionally skipping one subtree
    /// or failing at one node.
    struct Recorder<'ast> {
        entered: Vec<&'ast str>,
        left: Vec<&'ast str>,
        skip: Option<&'static str>,
        fail: Option<&'static str>,
    }

    impl<'ast> Recorder<'ast> {
        fn new() -> Self {
            Self {
                entered: Vec::new(),
                left: Vec::new(),
                skip: None,
                fail: None,
            }
        }
    }

    impl<'ast> Visitor<'ast> for Recorder<'ast> {
        fn enter(&mut self, node: &'ast SyntaxNode<'ast>) -> Result<Flow, LintError> {
            if let Some(name) = node.value() {
                if self.fail == Some(name) {
                    return Err(LintError::UndeclaredVariable {
                        variable: name.into(),
                        file: "test.nasl".into(),
                        line: node.line(),
                    });
                }
                self.entered.push(name);
                if self.skip == Some(name) {
                    return Ok(Flow::Skip);
                }
            }
            Ok(Flow::Continue)
        }

        fn leave(&mut self, node: &'ast SyntaxNode<'ast>) -> Result<(), LintError> {
            if let Some(name) = node.value() {
                self.left.push(name);
            }
            Ok(())
        }
    }

    #[test]
    fn visits_children_left_to_right() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let left = b.var("left", 1);
        let right = b.var("right", 1);
        let root = b.node(
            NodeKind::Binary,
            Some("root"),
            1,
            [Some(left), Some(right), None, None],
        );

        let mut rec = Recorder::new();
        walk(root, &mut rec).unwrap();
        assert_eq!(rec.entered, ["root", "left", "right"]);
        // Leave order is children first, then the parent.
        assert_eq!(rec.left, ["left", "right", "root"]);
    }

    #[test]
    fn skip_drops_subtree_and_leave_hook() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let inner = b.var("inner", 2);
        let skipped = b.node(
            NodeKind::FunctionDef,
            Some("skipped"),
            2,
            [Some(inner), None, None, None],
        );
        let after = b.var("after", 3);
        let root = b.node(
            NodeKind::Block,
            Some("root"),
            1,
            [Some(skipped), Some(after), None, None],
        );

        let mut rec = Recorder::new();
        rec.skip = Some("skipped");
        walk(root, &mut rec).unwrap();
        assert_eq!(rec.entered, ["root", "skipped", "after"]);
        assert_eq!(rec.left, ["after", "root"]);
    }

    #[test]
    fn error_short_circuits_siblings() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let bad = b.var("bad", 1);
        let never = b.var("never", 1);
        let root = b.node(
            NodeKind::Block,
            Some("root"),
            1,
            [Some(bad), Some(never), None, None],
        );

        let mut rec = Recorder::new();
        rec.fail = Some("bad");
        let err = walk(root, &mut rec).unwrap_err();
        assert_eq!(err.kind(), "undeclared-variable");
        assert_eq!(rec.entered, ["root"]);
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        // A block chain far deeper than any native call stack would allow
        // if the walker recursed.
        let mut node = b.var("leaf", 1);
        for _ in 0..200_000 {
            node = b.node(NodeKind::Block, None, 1, [Some(node), None, None, None]);
        }

        let mut rec = Recorder::new();
        walk(node, &mut rec).unwrap();
        assert_eq!(rec.entered, ["leaf"]);
    }
}
