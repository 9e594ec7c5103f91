use serde::Serialize;
use taskbar_model::{Diagnostic, DiagnosticKind};

use crate::{matcher::MatchReport, present::VisibilityReport};

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// Whether the pass reached the apply step.
    pub applied: bool,
    /// Task indicators, overflow selector excluded.
    pub indicators: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub orphans: usize,
    pub hidden: usize,
    pub shown: usize,
    pub overflow: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassReport {
    pub(crate) fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Default::default()
        }
    }

    pub(crate) fn from_match(report: &MatchReport) -> Self {
        Self {
            matched: report.pairs.len(),
            unmatched: report.unmatched.len(),
            orphans: report.orphans.len(),
            hidden: report.hidden,
            diagnostics: report.diagnostics.clone(),
            ..Default::default()
        }
    }

    /// Fold in the applied live set; `live` counts the overflow selector, which exists iff any task indicator does.
    pub(crate) fn absorb(
        &mut self,
        live: usize,
        visibility: VisibilityReport,
        sync_diagnostics: Vec<Diagnostic>,
    ) {
        self.applied = true;
        self.indicators = live.saturating_sub(1);
        self.shown = visibility.shown;
        self.overflow = visibility.overflow;
        self.diagnostics.extend(sync_diagnostics);
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind() == kind)
    }
}
