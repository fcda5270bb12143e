//! Pass 4: report include files no call ever resolved into.
//!
//! The only batched error category: one diagnostic per unused file, in
//! sorted filename order, then a single rejection for the lot. Everything
//! else in the analyzer fails at the point of detection.

use nasl_core::diagnostics::{Diagnostic, DiagnosticSink};
use nasl_core::error::LintError;

use crate::context::LintContext;

/// The unused-include check.
pub struct IncludeUsagePass<'a, 'run> {
    ctx: &'run LintContext<'a>,
    sink: &'run mut dyn DiagnosticSink,
}

impl<'a, 'run> IncludeUsagePass<'a, 'run> {
    /// Create the pass over `ctx`.
    pub fn new(ctx: &'run LintContext<'a>, sink: &'run mut dyn DiagnosticSink) -> Self {
        Self { ctx, sink }
    }

    /// Report every still-unused include and fail if there were any.
    pub fn run(self) -> Result<(), LintError> {
        let unused = self.ctx.unused_includes();
        if unused.is_empty() {
            return Ok(());
        }
        for file in &unused {
            self.sink.report(Diagnostic::whole_file(
                self.ctx.top_file(),
                format!("included file '{file}' is never used"),
            ));
        }
        Err(LintError::UnusedIncludeFile {
            files: unused.into_iter().map(String::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasl_core::diagnostics::Diagnostics;
    use nasl_core::registry::{BuiltinTable, IncludeMap};

    #[test]
    fn clean_context_passes() {
        let builtins = BuiltinTable::new();
        let includes = IncludeMap::new();
        let ctx = LintContext::new("scan.nasl", &builtins, &includes);
        let mut sink = Diagnostics::new();
        assert!(IncludeUsagePass::new(&ctx, &mut sink).run().is_ok());
        assert!(sink.is_empty());
    }

    #[test]
    fn unused_includes_batch_into_one_rejection() {
        let builtins = BuiltinTable::new();
        let includes = IncludeMap::new();
        let mut ctx = LintContext::new("scan.nasl", &builtins, &includes);
        ctx.track_include("zz.inc");
        ctx.track_include("aa.inc");
        ctx.track_include("used.inc");
        ctx.mark_include_used("used.inc");

        let mut sink = Diagnostics::new();
        let err = IncludeUsagePass::new(&ctx, &mut sink).run().unwrap_err();

        assert_eq!(
            err,
            LintError::UnusedIncludeFile {
                files: vec!["aa.inc".into(), "zz.inc".into()],
            }
        );
        let messages: Vec<_> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "included file 'aa.inc' is never used",
                "included file 'zz.inc' is never used",
            ]
        );
        // Whole-file findings are attributed to the script, without a line.
        assert!(sink.iter().all(|d| d.line.is_none() && d.file == "scan.nasl"));
    }
}
