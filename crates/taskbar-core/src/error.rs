use thiserror::Error;

/// Failure reported by a host collaborator.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no indicator at index {0}")]
    InvalidIndex(usize),

    #[error("indicator {0} is not bound to a task")]
    Unbound(usize),

    #[error("execution of {task} failed: {source}")]
    Execution {
        task: String,
        #[source]
        source: HostError,
    },

    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}
