//! Interfaces to the two collaborators the analyzer consults.
//!
//! The analyzer never resolves names on its own: the language runtime
//! knows which functions are builtins, and the include loader knows which
//! source file a user-defined function came from. Both are injected as
//! trait objects; [`BuiltinTable`] and [`IncludeMap`] are the obvious
//! hash-backed implementations for runtimes and tests.

use rustc_hash::{FxHashMap, FxHashSet};

/// The language runtime's function registry.
pub trait BuiltinRegistry {
    /// Whether `name` resolves to a builtin function.
    fn contains(&self, name: &str) -> bool;
}

/// The include loader's attribution of functions to source files.
pub trait IncludeResolver {
    /// The source filename the function `name` was declared in, if the
    /// loader knows it. Returns the top-level script's own filename for
    /// functions defined there, an include filename for pulled-in ones.
    fn owning_file(&self, function: &str) -> Option<&str>;
}

/// Set-backed [`BuiltinRegistry`].
#[derive(Debug, Default)]
pub struct BuiltinTable {
    names: FxHashSet<String>,
}

impl BuiltinTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the given builtin names.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Register one builtin.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Number of registered builtins.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no builtins are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl BuiltinRegistry for BuiltinTable {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Map-backed [`IncludeResolver`].
#[derive(Debug, Default)]
pub struct IncludeMap {
    owners: FxHashMap<String, String>,
}

impl IncludeMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `function` to `file`.
    pub fn insert(&mut self, function: impl Into<String>, file: impl Into<String>) {
        self.owners.insert(function.into(), file.into());
    }
}

impl IncludeResolver for IncludeMap {
    fn owning_file(&self, function: &str) -> Option<&str> {
        self.owners.get(function).map(String::as_str)
    }
}
