use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayError {
    // Caller contract violations: bad amounts, missing sinks, bad durations.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },
}

impl DisplayError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::debug!("Rejecting call: {}", msg);
        DisplayError::InvalidArgument(msg)
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DisplayError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;
