use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a diagnostic, used to pick its log level and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    TaskNotFound,
    NoMatchingConfiguration,
    AmbiguousMatch,
    InvalidFilePattern,
    FetchFailed,
    ExecutionFailed,
    InvalidCommandArgument,
    NoWorkspace,
}

/// Recoverable problem found while reconciling or handling a command.
///
/// Diagnostics never abort a pass; they are collected and handed to the registered sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Diagnostic {
    /// A configured task claimed no runtime task.
    TaskNotFound { label: String, scope: String },
    /// A workspace runtime task was claimed by no configuration entry.
    NoMatchingConfiguration { task: String },
    /// Several runtime tasks satisfied a name+detail match; the first was taken.
    AmbiguousMatch { label: String, candidates: usize },
    /// A file pattern failed to compile; its indicator stays hidden.
    InvalidFilePattern { pattern: String, reason: String },
    /// The runtime task enumeration failed; the pass was skipped.
    FetchFailed { reason: String },
    /// Executing a runtime task failed.
    ExecutionFailed { task: String, reason: String },
    /// A command received an argument it could not use.
    InvalidCommandArgument { reason: String },
    /// No workspace folder is open; presentation was cleared.
    NoWorkspace,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::TaskNotFound { .. } => DiagnosticKind::TaskNotFound,
            Diagnostic::NoMatchingConfiguration { .. } => DiagnosticKind::NoMatchingConfiguration,
            Diagnostic::AmbiguousMatch { .. } => DiagnosticKind::AmbiguousMatch,
            Diagnostic::InvalidFilePattern { .. } => DiagnosticKind::InvalidFilePattern,
            Diagnostic::FetchFailed { .. } => DiagnosticKind::FetchFailed,
            Diagnostic::ExecutionFailed { .. } => DiagnosticKind::ExecutionFailed,
            Diagnostic::InvalidCommandArgument { .. } => DiagnosticKind::InvalidCommandArgument,
            Diagnostic::NoWorkspace => DiagnosticKind::NoWorkspace,
        }
    }

    /// Task label or name the diagnostic is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Diagnostic::TaskNotFound { label, .. } | Diagnostic::AmbiguousMatch { label, .. } => {
                Some(label)
            }
            Diagnostic::NoMatchingConfiguration { task }
            | Diagnostic::ExecutionFailed { task, .. } => Some(task),
            Diagnostic::InvalidFilePattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TaskNotFound { label, scope } => {
                write!(f, "task not found: {label} ({scope})")
            }
            Diagnostic::NoMatchingConfiguration { task } => {
                write!(f, "no matching configuration for task: {task}")
            }
            Diagnostic::AmbiguousMatch { label, candidates } => {
                write!(f, "{candidates} tasks match {label} by name and detail; using the first")
            }
            Diagnostic::InvalidFilePattern { pattern, reason } => {
                write!(f, "invalid file pattern {pattern:?}: {reason}")
            }
            Diagnostic::FetchFailed { reason } => write!(f, "failed to fetch tasks: {reason}"),
            Diagnostic::ExecutionFailed { task, reason } => {
                write!(f, "failed to execute {task}: {reason}")
            }
            Diagnostic::InvalidCommandArgument { reason } => {
                write!(f, "invalid command argument: {reason}")
            }
            Diagnostic::NoWorkspace => f.write_str("no workspace folder open"),
        }
    }
}
