//! Human-readable findings and the sink they are written through.
//!
//! The linter's only externally visible side effect besides its verdict is
//! a stream of [`Diagnostic`] lines pushed into a [`DiagnosticSink`]
//! supplied by the caller. Most findings are written at the moment they
//! abort the run; unused-include findings are batched and written together.
//! [`Diagnostics`] is a ready-made collecting sink for callers that just
//! want the lines afterwards.

use std::collections::VecDeque;
use std::fmt;

/// A single finding with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Filename the finding is attributed to (top-level script or an
    /// include file).
    pub file: String,
    /// 1-based source line, or `None` for whole-file findings such as an
    /// unused include.
    pub line: Option<u32>,
    /// Finding text.
    pub message: String,
}

impl Diagnostic {
    /// Finding at a specific line.
    pub fn at(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Whole-file finding.
    pub fn whole_file(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: error: {}", self.file, line, self.message),
            None => write!(f, "{}: error: {}", self.file, self.message),
        }
    }
}

/// Receiver for findings, supplied by the embedding runtime.
pub trait DiagnosticSink {
    /// Accept one finding. Called in detection order.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A collecting sink that keeps findings in arrival order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: VecDeque<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no findings were collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of collected findings.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Iterate findings in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drop all findings.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Write all findings to `writer`, one per line.
    pub fn emit<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(writer, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push_back(diagnostic);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
