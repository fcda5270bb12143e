//! Syntax tree node type for NASL scripts.
//!
//! The parser produces an immutable tree of [`SyntaxNode`]s, allocated in a
//! [`bumpalo::Bump`] arena. Every node carries a tag, an optional string
//! payload (identifier, callee name, literal text), a 1-based source line,
//! and exactly four ordered child slots. The analyzer only reads the tree;
//! construction goes through [`TreeBuilder`].
//!
//! Four slots are enough for the widest NASL construct (`for` uses
//! init/cond/step/body). Sequences and argument lists are chained through a
//! child slot rather than stored as variable-length vectors, so the node
//! layout stays fixed-size and arena-friendly.

use bumpalo::Bump;

/// Number of ordered child slots per node.
pub const CHILD_SLOTS: usize = 4;

/// Tag identifying what a [`SyntaxNode`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Function call. Payload: callee name. Child 0: first [`NodeKind::Argument`].
    Call,
    /// One call argument. Payload: parameter name for named arguments
    /// (`f(port: 80)`), `None` for anonymous ones. Child 0: value
    /// expression, child 1: next argument.
    Argument,
    /// Function definition. Payload: function name. Child 0: first
    /// parameter [`NodeKind::Decl`], child 1: body.
    FunctionDef,
    /// Plain variable reference. Payload: variable name.
    Var,
    /// Array element reference. Payload: array name. Child 0: index
    /// expression.
    ArrayElement,
    /// Assignment. Child 0: lvalue, child 1: rvalue.
    Assign,
    /// Compound assignment (`+=`, `-=`, ...). Child 0: lvalue, child 1: rvalue.
    CompoundAssign,
    /// Increment / decrement. Child 0: lvalue.
    Increment,
    /// Logical negation. Child 0: operand.
    Not,
    /// A single declared identifier. Payload: name. Child 1: next
    /// declaration in a parameter or `local_var`/`global_var` list.
    Decl,
    /// `local_var` statement. Child 0: first [`NodeKind::Decl`].
    LocalDecl,
    /// `global_var` statement. Child 0: first [`NodeKind::Decl`].
    GlobalDecl,
    /// `foreach var (iterable) body`. Payload: binding variable name.
    /// Child 0: iterable expression, child 1: body.
    Foreach,
    /// Constant / literal. Payload: the text for string constants, `None`
    /// for purely numeric ones.
    Constant,
    /// Statement sequence link. Child 0: statement, child 1: rest of the
    /// sequence.
    Block,
    /// `if`. Child 0: condition, child 1: then branch, child 2: else branch.
    If,
    /// `while` / `repeat`. Child 0: condition, child 1: body.
    Loop,
    /// `for`. Children 0-3: init, condition, step, body.
    For,
    /// `return`. Child 0: optional value expression.
    Return,
    /// Binary operator. Children 0-1: operands.
    Binary,
    /// Unary operator other than `!` and `++`/`--`. Child 0: operand.
    Unary,
}

/// One node of a parsed NASL script.
///
/// Nodes are immutable after construction and borrow from the arena the
/// tree was built in; `'ast` is that arena's lifetime. An absent child slot
/// means "no subtree there" — the parser normalizes away any internal
/// placeholder cells before handing the tree over.
#[derive(Debug)]
pub struct SyntaxNode<'ast> {
    kind: NodeKind,
    value: Option<&'ast str>,
    line: u32,
    children: [Option<&'ast SyntaxNode<'ast>>; CHILD_SLOTS],
}

impl<'ast> SyntaxNode<'ast> {
    /// The node's tag.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The node's string payload, if any.
    pub fn value(&self) -> Option<&'ast str> {
        self.value
    }

    /// 1-based source line the node starts on.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// All four ordered child slots.
    pub fn children(&self) -> &[Option<&'ast SyntaxNode<'ast>>; CHILD_SLOTS] {
        &self.children
    }

    /// A single child slot.
    pub fn child(&self, index: usize) -> Option<&'ast SyntaxNode<'ast>> {
        self.children[index]
    }
}

/// Arena-backed constructor for syntax trees.
///
/// The external parser uses this to materialize nodes; the test suites use
/// it to assemble scripts by hand. String payloads are copied into the
/// arena once, so every table the analyzer later builds can borrow them
/// without further allocation.
pub struct TreeBuilder<'ast> {
    arena: &'ast Bump,
}

impl<'ast> TreeBuilder<'ast> {
    /// Create a builder allocating into `arena`.
    pub fn new(arena: &'ast Bump) -> Self {
        Self { arena }
    }

    /// Allocate a node with explicit child slots.
    pub fn node(
        &self,
        kind: NodeKind,
        value: Option<&str>,
        line: u32,
        children: [Option<&'ast SyntaxNode<'ast>>; CHILD_SLOTS],
    ) -> &'ast SyntaxNode<'ast> {
        let value = value.map(|v| &*self.arena.alloc_str(v));
        self.arena.alloc(SyntaxNode {
            kind,
            value,
            line,
            children,
        })
    }

    /// Leaf node with no payload and no children.
    pub fn leaf(&self, kind: NodeKind, line: u32) -> &'ast SyntaxNode<'ast> {
        self.node(kind, None, line, [None; CHILD_SLOTS])
    }

    /// Variable reference.
    pub fn var(&self, name: &str, line: u32) -> &'ast SyntaxNode<'ast> {
        self.node(NodeKind::Var, Some(name), line, [None; CHILD_SLOTS])
    }

    /// Array element reference.
    pub fn array_element(
        &self,
        name: &str,
        index: &'ast SyntaxNode<'ast>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(
            NodeKind::ArrayElement,
            Some(name),
            line,
            [Some(index), None, None, None],
        )
    }

    /// String constant.
    pub fn string(&self, text: &str, line: u32) -> &'ast SyntaxNode<'ast> {
        self.node(NodeKind::Constant, Some(text), line, [None; CHILD_SLOTS])
    }

    /// Numeric constant (no string payload).
    pub fn number(&self, line: u32) -> &'ast SyntaxNode<'ast> {
        self.leaf(NodeKind::Constant, line)
    }

    /// Call expression over an already-chained argument list.
    pub fn call(
        &self,
        name: &str,
        args: Option<&'ast SyntaxNode<'ast>>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(NodeKind::Call, Some(name), line, [args, None, None, None])
    }

    /// One argument in a call's argument chain.
    pub fn argument(
        &self,
        name: Option<&str>,
        value: Option<&'ast SyntaxNode<'ast>>,
        next: Option<&'ast SyntaxNode<'ast>>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(NodeKind::Argument, name, line, [value, next, None, None])
    }

    /// Chain anonymous argument expressions into an argument list.
    pub fn arguments(
        &self,
        values: &[&'ast SyntaxNode<'ast>],
        line: u32,
    ) -> Option<&'ast SyntaxNode<'ast>> {
        let mut next = None;
        for value in values.iter().rev() {
            next = Some(self.argument(None, Some(value), next, line));
        }
        next
    }

    /// Function definition with a pre-chained parameter list.
    pub fn function_def(
        &self,
        name: &str,
        params: Option<&'ast SyntaxNode<'ast>>,
        body: Option<&'ast SyntaxNode<'ast>>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(
            NodeKind::FunctionDef,
            Some(name),
            line,
            [params, body, None, None],
        )
    }

    /// Chain identifiers into a `Decl` list (parameters, `local_var` names).
    pub fn decls(&self, names: &[&str], line: u32) -> Option<&'ast SyntaxNode<'ast>> {
        let mut next = None;
        for name in names.iter().rev() {
            next = Some(self.node(NodeKind::Decl, Some(name), line, [None, next, None, None]));
        }
        next
    }

    /// `local_var` statement.
    pub fn local_var(&self, names: &[&str], line: u32) -> &'ast SyntaxNode<'ast> {
        let decls = self.decls(names, line);
        self.node(NodeKind::LocalDecl, None, line, [decls, None, None, None])
    }

    /// `global_var` statement.
    pub fn global_var(&self, names: &[&str], line: u32) -> &'ast SyntaxNode<'ast> {
        let decls = self.decls(names, line);
        self.node(NodeKind::GlobalDecl, None, line, [decls, None, None, None])
    }

    /// Assignment statement.
    pub fn assign(
        &self,
        lvalue: &'ast SyntaxNode<'ast>,
        rvalue: &'ast SyntaxNode<'ast>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(
            NodeKind::Assign,
            None,
            line,
            [Some(lvalue), Some(rvalue), None, None],
        )
    }

    /// `foreach` loop.
    pub fn foreach(
        &self,
        binding: &str,
        iterable: &'ast SyntaxNode<'ast>,
        body: Option<&'ast SyntaxNode<'ast>>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(
            NodeKind::Foreach,
            Some(binding),
            line,
            [Some(iterable), body, None, None],
        )
    }

    /// `return` statement.
    pub fn ret(
        &self,
        value: Option<&'ast SyntaxNode<'ast>>,
        line: u32,
    ) -> &'ast SyntaxNode<'ast> {
        self.node(NodeKind::Return, None, line, [value, None, None, None])
    }

    /// Fold statements into a right-leaning `Block` chain.
    pub fn sequence(&self, stmts: &[&'ast SyntaxNode<'ast>]) -> Option<&'ast SyntaxNode<'ast>> {
        let mut rest = None;
        for stmt in stmts.iter().rev() {
            let line = stmt.line();
            rest = Some(self.node(NodeKind::Block, None, line, [Some(stmt), rest, None, None]));
        }
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_copied_into_arena() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let name = String::from("register_service");
        let node = b.call(&name, None, 3);
        drop(name);
        assert_eq!(node.value(), Some("register_service"));
        assert_eq!(node.kind(), NodeKind::Call);
        assert_eq!(node.line(), 3);
    }

    #[test]
    fn argument_chain_order() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let one = b.number(1);
        let two = b.number(1);
        let args = b.arguments(&[one, two], 1).unwrap();

        assert_eq!(args.kind(), NodeKind::Argument);
        assert!(std::ptr::eq(args.child(0).unwrap(), one));
        let second = args.child(1).unwrap();
        assert!(std::ptr::eq(second.child(0).unwrap(), two));
        assert!(second.child(1).is_none());
    }

    #[test]
    fn decl_chain_preserves_names() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let decls = b.decls(&["a", "b", "c"], 2).unwrap();

        let mut names = Vec::new();
        let mut cur = Some(decls);
        while let Some(d) = cur {
            names.push(d.value().unwrap());
            cur = d.child(1);
        }
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn sequence_folds_right() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let s1 = b.var("x", 1);
        let s2 = b.var("y", 2);
        let seq = b.sequence(&[s1, s2]).unwrap();

        assert_eq!(seq.kind(), NodeKind::Block);
        assert!(std::ptr::eq(seq.child(0).unwrap(), s1));
        assert!(std::ptr::eq(seq.child(1).unwrap().child(0).unwrap(), s2));
        assert!(b.sequence(&[]).is_none());
    }
}
