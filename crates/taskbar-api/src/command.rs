use serde::Deserialize;
use serde_json::Value;
use taskbar_core::RunTarget;
use taskbar_model::{Diagnostic, RuntimeTask};
use tracing::{debug, instrument};

use crate::{error::ApiError, handler::CommandHandler};

/// Command id of "run this task".
pub const RUN_COMMAND: &str = "taskbar.run";

/// Command id of "open the selection list".
pub const SELECT_COMMAND: &str = "taskbar.select";

/// Argument of the run command: a live indicator position or a runtime task.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RunArg {
    Index(usize),
    Task(RuntimeTask),
}

impl From<RunArg> for RunTarget {
    fn from(arg: RunArg) -> Self {
        match arg {
            RunArg::Index(index) => RunTarget::Index(index),
            RunArg::Task(task) => RunTarget::Task(task),
        }
    }
}

impl RunArg {
    pub fn parse(argument: Option<Value>) -> Result<Self, ApiError> {
        let argument = argument.ok_or_else(|| ApiError::InvalidArgument("missing argument".into()))?;
        serde_json::from_value(argument)
            .map_err(|_| ApiError::InvalidArgument("expected an indicator index or a task".into()))
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// A task was executed.
    Ran(RuntimeTask),
    /// The selection list was dismissed without a choice.
    Cancelled,
    /// The argument was unusable; a diagnostic was reported and nothing happened.
    Ignored,
}

/// Route a host command to `handler`.
///
/// Argument problems (missing, malformed, stale index) are reported through [`CommandHandler::report`] and yield
/// `Ok(Dispatched::Ignored)`. Execution failures are returned as errors after the user was warned.
#[instrument(level = "debug", skip(handler, argument))]
pub async fn dispatch<H>(
    handler: &H,
    command: &str,
    argument: Option<Value>,
) -> Result<Dispatched, ApiError>
where
    H: CommandHandler + ?Sized,
{
    let outcome = match command {
        RUN_COMMAND => match RunArg::parse(argument) {
            Ok(arg) => handler.run(arg.into()).await.map(Dispatched::Ran),
            Err(e) => Err(e),
        },
        SELECT_COMMAND => handler
            .select()
            .await
            .map(|choice| choice.map_or(Dispatched::Cancelled, Dispatched::Ran)),
        other => return Err(ApiError::UnknownCommand(other.to_string())),
    };

    match outcome {
        Err(e) if e.is_argument_error() => {
            debug!(error = %e, "command ignored");
            handler.report(Diagnostic::InvalidCommandArgument {
                reason: e.to_string(),
            });
            Ok(Dispatched::Ignored)
        }
        other => other,
    }
}
