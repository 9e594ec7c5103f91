use taskbar_model::{Diagnostic, DiagnosticKind};
use tracing::{debug, error, info, warn};

#[inline]
pub fn message_for(kind: DiagnosticKind) -> &'static str {
    match kind {
        // matching
        DiagnosticKind::TaskNotFound => "configured task has no runtime task; no indicator",
        DiagnosticKind::NoMatchingConfiguration => "runtime task has no configuration entry",
        DiagnosticKind::AmbiguousMatch => "several runtime tasks match by name and detail; first one taken",

        // presentation
        DiagnosticKind::InvalidFilePattern => "file pattern does not compile; indicator stays hidden",
        DiagnosticKind::NoWorkspace => "no workspace folder open; indicators cleared",

        // host
        DiagnosticKind::FetchFailed => "fetching runtime tasks failed; pass skipped",
        DiagnosticKind::ExecutionFailed => "task execution failed",

        // commands
        DiagnosticKind::InvalidCommandArgument => "command argument ignored",
    }
}

#[inline]
pub fn log_diagnostic(d: &Diagnostic) {
    let msg = message_for(d.kind());

    match d {
        // matching
        Diagnostic::TaskNotFound { label, scope } => warn!(task = %label, %scope, "{msg}"),
        Diagnostic::NoMatchingConfiguration { task } => debug!(%task, "{msg}"),
        Diagnostic::AmbiguousMatch { label, candidates } => {
            warn!(task = %label, candidates, "{msg}")
        }

        // presentation
        Diagnostic::InvalidFilePattern { pattern, reason } => {
            warn!(%pattern, %reason, "{msg}")
        }
        Diagnostic::NoWorkspace => info!("{msg}"),

        // host
        Diagnostic::FetchFailed { reason } => error!(%reason, "{msg}"),
        Diagnostic::ExecutionFailed { task, reason } => warn!(%task, %reason, "{msg}"),

        // commands
        Diagnostic::InvalidCommandArgument { reason } => warn!(%reason, "{msg}"),
    }
}
