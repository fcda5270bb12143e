//! Error taxonomy for script analysis.
//!
//! Every way the linter can reject a script is one variant of
//! [`LintError`]. All five are fatal to the script under analysis; the
//! scheduling layer that invoked the linter decides what the rejection
//! means for the wider scan. Errors are propagated by ordinary `Result`
//! returns through the traversal, so a failure in any subtree
//! short-circuits the enclosing pass and the whole run.

use thiserror::Error;

/// A fatal finding that rejects the analyzed script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    /// The same function name is defined twice in the script.
    #[error("{file}:{line}: function '{function}' is defined more than once")]
    DuplicateFunctionDefinition {
        function: String,
        file: String,
        line: u32,
    },

    /// A single call passes the same named parameter twice.
    #[error(
        "{file}:{line}: parameter '{parameter}' passed to function '{function}' \
         was provided multiple times"
    )]
    DuplicateCallParameter {
        function: String,
        parameter: String,
        file: String,
        line: u32,
    },

    /// A call reachable from the program entry targets a name that is
    /// neither a builtin nor defined anywhere in the script.
    #[error("{file}:{line}: undefined function '{function}'")]
    UndefinedFunction {
        function: String,
        file: String,
        line: u32,
    },

    /// A variable is read before any assignment, declaration, or foreach
    /// binding of that name in traversal order.
    #[error("{file}:{line}: variable '{variable}' was not declared")]
    UndeclaredVariable {
        variable: String,
        file: String,
        line: u32,
    },

    /// Included files none of whose functions were ever resolved by a
    /// call. The only batched category: collected after the call passes,
    /// reported once for the whole run.
    #[error("{} included file(s) are never used", files.len())]
    UnusedIncludeFile { files: Vec<String> },
}

impl LintError {
    /// Short stable name of the error kind, for logging and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            LintError::DuplicateFunctionDefinition { .. } => "duplicate-function-definition",
            LintError::DuplicateCallParameter { .. } => "duplicate-call-parameter",
            LintError::UndefinedFunction { .. } => "undefined-function",
            LintError::UndeclaredVariable { .. } => "undeclared-variable",
            LintError::UnusedIncludeFile { .. } => "unused-include-file",
        }
    }
}
