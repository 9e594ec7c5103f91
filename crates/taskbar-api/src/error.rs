use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("core error: {0}")]
    Core(#[from] taskbar_core::CoreError),
}

impl ApiError {
    /// Whether the error stems from the caller's argument rather than from execution.
    pub fn is_argument_error(&self) -> bool {
        use taskbar_core::CoreError;

        matches!(
            self,
            ApiError::InvalidArgument(_)
                | ApiError::Core(CoreError::InvalidIndex(_) | CoreError::Unbound(_))
        )
    }
}
