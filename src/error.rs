//! Error types for collaborator faults.
//!
//! The game rules themselves never fail; bomb contact freezes the session,
//! which is an outcome rather than an error.  What can fail is everything
//! around the rules: terminal I/O, configuration, asset lookup and logger
//! installation.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// Terminal or filesystem I/O failed.
    Io(std::io::Error),

    /// A configuration file exists but could not be parsed.
    Config {
        path: String,
        message: String,
    },

    /// The asset loader has no entry for the requested key.
    MissingAsset {
        name: String,
    },

    /// A tuning value is outside the range the session can run with.
    InvalidConfig {
        name: &'static str,
        value: f32,
        safe_range: &'static str,
    },

    /// A global logger was already installed.
    Logger(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Config { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            GameError::MissingAsset { name } => write!(f, "no asset registered under '{}'", name),
            GameError::InvalidConfig {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::Logger(msg) => write!(f, "could not install logger: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<log::SetLoggerError> for GameError {
    fn from(e: log::SetLoggerError) -> Self {
        GameError::Logger(e.to_string())
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
