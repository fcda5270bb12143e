//! Per-run mutable state shared by the analysis passes.
//!
//! One [`LintContext`] is created inside the orchestrator for each analyzed
//! script and dropped before it returns, on success and on every failure
//! path alike. All symbol tables borrow their keys from the tree arena and
//! the injected resolvers (`'a`), so a run performs no string copies beyond
//! what the parser already allocated.
//!
//! The original engine kept the "current file" as process-wide state,
//! which silently limited it to one analysis per process; here it is a
//! context field, making runs independent by construction.

use nasl_core::registry::{BuiltinRegistry, IncludeResolver};
use rustc_hash::{FxHashMap, FxHashSet};

/// One user-defined (or probe-registered) function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord<'a> {
    /// Function name.
    pub name: &'a str,
    /// `true` for functions the script actually defines, `false` for
    /// synthetic registrations created by a `defined_func` existence probe.
    pub declared: bool,
    /// Declared parameter names, in order.
    pub params: Vec<&'a str>,
    /// Line of the definition (or of the probe).
    pub line: u32,
}

/// One recorded call expression: an edge of the implicit call graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Name being called.
    pub callee: &'a str,
    /// Enclosing function, or `None` for top-level code.
    pub caller: Option<&'a str>,
    /// File the call was encountered in.
    pub file: &'a str,
    /// 1-based line of the call.
    pub line: u32,
}

/// Mutable state for one analysis run.
pub struct LintContext<'a> {
    top_file: &'a str,
    current_file: &'a str,
    builtins: &'a dyn BuiltinRegistry,
    includes: &'a dyn IncludeResolver,
    /// Names invoked anywhere in the tree (existence-only).
    called: FxHashSet<&'a str>,
    /// User-defined functions, keyed by name.
    functions: FxHashMap<&'a str, FunctionRecord<'a>>,
    /// Every call expression seen by the definition pass, in traversal order.
    call_sites: Vec<CallSite<'a>>,
    /// File an unresolved call to each name was last seen in.
    call_files: FxHashMap<&'a str, &'a str>,
    /// Include filename -> whether any call has resolved into it.
    include_files: FxHashMap<&'a str, bool>,
}

impl<'a> LintContext<'a> {
    /// Fresh context for one script.
    pub fn new(
        top_file: &'a str,
        builtins: &'a dyn BuiltinRegistry,
        includes: &'a dyn IncludeResolver,
    ) -> Self {
        Self {
            top_file,
            current_file: top_file,
            builtins,
            includes,
            called: FxHashSet::default(),
            functions: FxHashMap::default(),
            call_sites: Vec::new(),
            call_files: FxHashMap::default(),
            include_files: FxHashMap::default(),
        }
    }

    /// The analyzed script's own filename.
    pub fn top_file(&self) -> &'a str {
        self.top_file
    }

    /// The filename diagnostics are currently attributed to.
    pub fn current_file(&self) -> &'a str {
        self.current_file
    }

    /// Switch the active filename, returning the previous one so the
    /// caller can restore it when leaving the subtree.
    pub fn swap_current_file(&mut self, file: &'a str) -> &'a str {
        std::mem::replace(&mut self.current_file, file)
    }

    /// Whether the runtime resolves `name` as a builtin.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }

    /// Whether `name` resolves at all: a registered user function or a
    /// builtin.
    pub fn resolves(&self, name: &str) -> bool {
        self.functions.contains_key(name) || self.builtins.contains(name)
    }

    /// File the include loader attributes `function` to.
    pub fn owning_file(&self, function: &str) -> Option<&'a str> {
        self.includes.owning_file(function)
    }

    /// Record that `name` is invoked somewhere in the tree.
    pub fn mark_called(&mut self, name: &'a str) {
        self.called.insert(name);
    }

    /// Whether any call to `name` exists anywhere in the tree.
    pub fn is_called(&self, name: &str) -> bool {
        self.called.contains(name)
    }

    /// Number of distinct called names.
    pub fn called_count(&self) -> usize {
        self.called.len()
    }

    /// Register (or re-register) a function record.
    pub fn register_function(&mut self, record: FunctionRecord<'a>) {
        self.functions.insert(record.name, record);
    }

    /// Register a synthetic record for a `defined_func` existence probe.
    /// Never replaces a real definition.
    pub fn register_probe(&mut self, name: &'a str, line: u32) {
        self.functions.entry(name).or_insert(FunctionRecord {
            name,
            declared: false,
            params: Vec::new(),
            line,
        });
    }

    /// Look up a registered function.
    pub fn function(&self, name: &str) -> Option<&FunctionRecord<'a>> {
        self.functions.get(name)
    }

    /// Number of registered functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Record a call expression attributed to the active file.
    pub fn record_call_site(&mut self, callee: &'a str, caller: Option<&'a str>, line: u32) {
        self.call_sites.push(CallSite {
            callee,
            caller,
            file: self.current_file,
            line,
        });
    }

    /// All recorded call sites in traversal order.
    pub fn call_sites(&self) -> &[CallSite<'a>] {
        &self.call_sites
    }

    /// The most recently recorded site calling `callee`.
    pub fn latest_site(&self, callee: &str) -> Option<&CallSite<'a>> {
        self.call_sites.iter().rev().find(|s| s.callee == callee)
    }

    /// Remember the active file for an unresolved call to `callee`.
    pub fn note_call_file(&mut self, callee: &'a str) {
        self.call_files.insert(callee, self.current_file);
    }

    /// File an unresolved call to `callee` was last seen in.
    pub fn call_file(&self, callee: &str) -> Option<&'a str> {
        self.call_files.get(callee).copied()
    }

    /// Start tracking usage of an include file. The top-level file itself
    /// is never tracked.
    pub fn track_include(&mut self, file: &'a str) {
        if file != self.top_file {
            self.include_files.insert(file, false);
        }
    }

    /// Flip a tracked include to "used". Unknown files are ignored.
    pub fn mark_include_used(&mut self, file: &str) {
        if let Some(used) = self.include_files.get_mut(file) {
            *used = true;
        }
    }

    /// Tracked include files still marked unused, in sorted order so the
    /// report sequence is deterministic.
    pub fn unused_includes(&self) -> Vec<&'a str> {
        let mut unused: Vec<&'a str> = self
            .include_files
            .iter()
            .filter(|(_, used)| !**used)
            .map(|(file, _)| *file)
            .collect();
        unused.sort_unstable();
        unused
    }

    /// Walk the caller chain of `start` backwards and decide whether the
    /// call is reachable from the program entry.
    ///
    /// A site recorded in the top-level file (when that file is not itself
    /// an include being linted directly) is reachable. A self-recursive
    /// link stops the search without reachability, as does running out of
    /// caller records. A visited set stops mutual-recursion cycles among
    /// dead helpers, which the one-hop self check alone would loop on.
    pub fn reverse_reachable(&self, start: &CallSite<'a>) -> bool {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut site = start;
        loop {
            if site.file == self.top_file && !self.top_file.ends_with(".inc") {
                return true;
            }
            let Some(caller) = site.caller else {
                return false;
            };
            if site.callee == caller {
                return false;
            }
            if !visited.insert(caller) {
                return false;
            }
            match self.latest_site(caller) {
                Some(next) => site = next,
                None => return false,
            }
        }
    }
}
