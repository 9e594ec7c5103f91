mod config;
mod error;
mod format;
mod level;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::LoggerLevel;

/// Install the global tracing subscriber. A second call fails with [`LoggerError::AlreadyInitialized`].
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let cfg = LoggerConfig::default().with_level(LoggerLevel::new("warn").unwrap());
        logger_init(&cfg).unwrap();
        assert!(matches!(
            logger_init(&cfg),
            Err(LoggerError::AlreadyInitialized)
        ));
    }

    #[cfg(not(all(target_os = "linux", feature = "journald")))]
    #[test]
    fn journald_requires_the_feature() {
        let cfg = LoggerConfig::default().with_format(LoggerFormat::Journald);
        assert!(matches!(
            logger_init(&cfg),
            Err(LoggerError::JournaldNotSupported)
        ));
    }
}
