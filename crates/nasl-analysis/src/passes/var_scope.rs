//! Pass 6: flag variables read before anything defines them.
//!
//! Definedness is approximated by single-pass forward traversal order, not
//! by path-sensitive analysis: whatever an earlier node assigned,
//! declared, or bound in a foreach counts as defined from then on. Three
//! one-shot flags carry the "what does the next identifier mean" state
//! between a parent node and the identifier that follows it:
//!
//! - *assignment incoming* — armed by assign / not / increment /
//!   compound-assign, consumed by the next variable or array element,
//!   which is thereby defined in the active scope;
//! - *entering function scope* — armed by a function definition or
//!   `local_var`, makes following plain declarations local;
//! - *entering global scope* — armed by `global_var`, makes following
//!   plain declarations global.
//!
//! The two declaration flags only survive across the declaration list
//! itself; any other node disarms them. A read with no flag armed must
//! name something in the local set, the global set, the predefined
//! identifiers, or the runtime's builtin names.

use nasl_core::diagnostics::{Diagnostic, DiagnosticSink};
use nasl_core::error::LintError;
use nasl_core::tree::{NodeKind, SyntaxNode};
use rustc_hash::FxHashSet;

use crate::context::LintContext;
use crate::walker::{Flow, Visitor};

/// Identifiers the language predefines for every script.
const PREDEFINED_IDENTIFIERS: &[&str] = &[
    "ACT_UNKNOWN",
    "description",
    "NULL",
    "SCRIPT_NAME",
    "COMMAND_LINE",
    "_FCT_ANON_ARGS",
];

/// The variable-scope pass.
pub struct VariableScopePass<'a, 'run> {
    ctx: &'run mut LintContext<'a>,
    sink: &'run mut dyn DiagnosticSink,
    globals: FxHashSet<&'a str>,
    locals: FxHashSet<&'a str>,
    assign_armed: bool,
    fn_scope_armed: bool,
    global_scope_armed: bool,
    fn_depth: u32,
    saved_files: Vec<&'a str>,
}

impl<'a, 'run> VariableScopePass<'a, 'run> {
    /// Create the pass over `ctx`, seeding the predefined identifiers.
    pub fn new(ctx: &'run mut LintContext<'a>, sink: &'run mut dyn DiagnosticSink) -> Self {
        let globals = PREDEFINED_IDENTIFIERS.iter().copied().collect();
        Self {
            ctx,
            sink,
            globals,
            locals: FxHashSet::default(),
            assign_armed: false,
            fn_scope_armed: false,
            global_scope_armed: false,
            fn_depth: 0,
            saved_files: Vec::new(),
        }
    }

    /// Add `name` to the active scope.
    fn define(&mut self, name: &'a str) {
        if self.fn_depth > 0 {
            self.locals.insert(name);
        } else {
            self.globals.insert(name);
        }
    }

    fn check_read(&mut self, name: &'a str, line: u32) -> Result<(), LintError> {
        if self.locals.contains(name)
            || self.globals.contains(name)
            || self.ctx.is_builtin(name)
        {
            return Ok(());
        }
        let file = self.ctx.current_file();
        self.sink.report(Diagnostic::at(
            file,
            line,
            format!("variable '{name}' was not declared"),
        ));
        Err(LintError::UndeclaredVariable {
            variable: name.into(),
            file: file.into(),
            line,
        })
    }
}

impl<'a> Visitor<'a> for VariableScopePass<'a, '_> {
    fn enter(&mut self, node: &'a SyntaxNode<'a>) -> Result<Flow, LintError> {
        let kind = node.kind();

        if kind == NodeKind::FunctionDef {
            let Some(name) = node.value() else {
                return Ok(Flow::Skip);
            };
            if !self.ctx.is_called(name) {
                return Ok(Flow::Skip);
            }
            let file = self.ctx.owning_file(name).unwrap_or(self.ctx.top_file());
            self.saved_files.push(self.ctx.swap_current_file(file));
            self.fn_depth += 1;
            self.global_scope_armed = false;
            // Parameters are plain declarations right after the definition
            // node; they land in the local set.
            self.fn_scope_armed = true;
            return Ok(Flow::Continue);
        }

        if (self.fn_scope_armed || self.global_scope_armed) && kind != NodeKind::Decl {
            self.fn_scope_armed = false;
            self.global_scope_armed = false;
        }

        match kind {
            NodeKind::Assign
            | NodeKind::Not
            | NodeKind::Increment
            | NodeKind::CompoundAssign => {
                self.assign_armed = true;
            }
            NodeKind::LocalDecl => {
                self.fn_scope_armed = true;
            }
            NodeKind::GlobalDecl => {
                self.global_scope_armed = true;
            }
            NodeKind::Var | NodeKind::ArrayElement => {
                if let Some(name) = node.value() {
                    if self.assign_armed {
                        self.define(name);
                        self.assign_armed = false;
                    } else {
                        self.check_read(name, node.line())?;
                    }
                }
            }
            NodeKind::Decl => {
                if let Some(name) = node.value() {
                    if self.fn_scope_armed {
                        self.locals.insert(name);
                    }
                    if self.global_scope_armed {
                        self.globals.insert(name);
                    }
                }
            }
            NodeKind::Foreach => {
                if let Some(name) = node.value() {
                    self.define(name);
                }
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn leave(&mut self, node: &'a SyntaxNode<'a>) -> Result<(), LintError> {
        if node.kind() == NodeKind::FunctionDef {
            self.fn_depth -= 1;
            // NASL has no nested definitions; one local set per function
            // is enough.
            self.locals.clear();
            if let Some(previous) = self.saved_files.pop() {
                self.ctx.swap_current_file(previous);
            }
        }
        Ok(())
    }
}
