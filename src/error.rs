//! Error types for the aftercare CLI.
//!
//! Uses thiserror for derive macros. Almost every failure in the pipeline is
//! recovered locally and turned into a log line or a result record; these
//! variants cover the few places where an operation genuinely cannot proceed.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for aftercare operations.
#[derive(Error, Debug)]
pub enum AftercareError {
    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem operation failed on a specific path.
    #[error("{action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hook payload or transcript could not be decoded.
    #[error("invalid hook payload: {0}")]
    Payload(String),

    /// External command could not be parsed or spawned.
    #[error("command failed: {0}")]
    Command(String),

    /// User supplied an unusable argument to a direct subcommand.
    #[error("{0}")]
    User(String),
}

impl AftercareError {
    /// Build an [`AftercareError::Io`] for `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AftercareError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the exit code used when this error escapes to `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            AftercareError::User(_) => exit_codes::USER_ERROR,
            // Internal failures never turn a session into a reported failure.
            AftercareError::Config(_)
            | AftercareError::Io { .. }
            | AftercareError::Payload(_)
            | AftercareError::Command(_) => exit_codes::SUCCESS,
        }
    }
}

/// Result type alias for aftercare operations.
pub type Result<T> = std::result::Result<T, AftercareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_user_exit_code() {
        let err = AftercareError::User("root does not exist".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn internal_errors_exit_neutral() {
        let errs = [
            AftercareError::Config("bad yaml".to_string()),
            AftercareError::Payload("not json".to_string()),
            AftercareError::Command("spawn failed".to_string()),
            AftercareError::io(
                "failed to read",
                "/tmp/x",
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ),
        ];
        for err in errs {
            assert_eq!(err.exit_code(), exit_codes::SUCCESS, "{err}");
        }
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = AftercareError::Config("expected a mapping".to_string());
        assert_eq!(err.to_string(), "invalid configuration: expected a mapping");

        let err = AftercareError::io(
            "failed to remove",
            "/repo/a.ts",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to remove '/repo/a.ts': denied");
    }
}
