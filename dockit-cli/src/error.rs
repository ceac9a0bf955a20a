//! CLI error types and exit codes.

use std::path::PathBuf;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Validation failure - the layout parsed but has structural problems
    pub const VALIDATION_FAILURE: i32 = 1;
    /// General error - unreadable file, malformed JSON, or other usage
    /// problems
    pub const GENERAL_ERROR: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Layout file could not be read
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// File contents are not layout JSON
    #[error("Cannot parse {}: {source}", .path.display())]
    Parse {
        /// Path whose contents failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Validation found structural problems
    #[error("Validation failed: {count} issue(s) found")]
    Invalid {
        /// Number of issues reported.
        count: usize,
    },
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Validation failure (the layout has structural problems)
    /// - 2: General error (unreadable file, malformed JSON)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid { .. } => exit_codes::VALIDATION_FAILURE,
            Self::Read { .. } | Self::Parse { .. } => exit_codes::GENERAL_ERROR,
        }
    }
}
