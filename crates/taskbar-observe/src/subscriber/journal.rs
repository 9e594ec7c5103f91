use taskbar_core::DiagnosticSink;
use taskbar_model::Diagnostic;

use crate::subscriber::view::log_diagnostic;

/// Diagnostic sink writing every diagnostic to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for Journal {
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        log_diagnostic(diagnostic);
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
