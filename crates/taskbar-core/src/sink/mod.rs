use std::sync::Arc;

use parking_lot::Mutex;
use taskbar_model::Diagnostic;

/// Receiver of diagnostics produced by passes and commands.
pub trait DiagnosticSink: Send + Sync {
    fn on_diagnostic(&self, diagnostic: &Diagnostic);

    fn name(&self) -> &'static str;
}

/// Sink that keeps every diagnostic in memory.
#[derive(Clone, Default)]
pub struct Collector {
    inner: Arc<Mutex<Vec<Diagnostic>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }

    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl DiagnosticSink for Collector {
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        self.inner.lock().push(diagnostic.clone());
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}
