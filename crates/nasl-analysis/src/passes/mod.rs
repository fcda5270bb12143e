//! Analysis passes, in orchestration order.
//!
//! - [`call_graph`]: collect every invoked function name
//! - [`definitions`]: register called definitions, record call sites,
//!   reject duplicate call parameters; a second invocation rejects
//!   duplicate definitions
//! - [`call_validation`]: resolve call sites, reverse-reachability search
//!   for misses, include-usage marking, `defined_func` probes
//! - [`include_usage`]: batched unused-include report
//! - [`var_scope`]: undeclared-variable reads

pub mod call_graph;
pub mod call_validation;
pub mod definitions;
pub mod include_usage;
pub mod var_scope;

pub use call_graph::CallGraphPass;
pub use call_validation::CallValidationPass;
pub use definitions::{DefinitionPass, Mode};
pub use include_usage::IncludeUsagePass;
pub use var_scope::VariableScopePass;
