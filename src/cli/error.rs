//! CLI-level errors (wraps tree and config errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Tree(_) => crate::exitcode::DATAERR,
            CliError::Config(SettingsError::NotFound(_)) => crate::exitcode::NOINPUT,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::AlreadyExists(_) => crate::exitcode::CANTCREAT,
            CliError::Io { .. } => crate::exitcode::IOERR,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::from(TreeError::InvalidKey).exit_code(), exitcode::DATAERR);
        assert_eq!(
            CliError::from(SettingsError::NotFound(PathBuf::from("x.toml"))).exit_code(),
            exitcode::NOINPUT
        );
        assert_eq!(CliError::Usage("bad".into()).exit_code(), exitcode::USAGE);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(CliError::io("read stdin", io).exit_code(), exitcode::IOERR);
    }
}
