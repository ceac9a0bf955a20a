//! Error types for dock operations
//!
//! The crate distinguishes loud failures (unknown widget kinds, structural
//! operations on an unattached docker, malformed JSON) from benign
//! anomalies (dirty queries for unknown ids, activation while detached),
//! which degrade to silent no-ops and never reach this module.

/// Errors that can occur while creating widgets or moving layouts in and
/// out of their serialized form.
#[derive(Debug, thiserror::Error)]
pub enum DockError {
    /// No factory is registered under the requested kind name.
    #[error("unknown widget kind: {0}")]
    UnknownKind(String),

    /// A structural operation ran before the docker was attached.
    #[error("docker is not attached; call attach() first")]
    NotAttached,

    /// A layout could not be parsed from or encoded to JSON.
    ///
    /// Surfaced untouched so hosts see the original `serde_json` message
    /// (line, column, expected shape).
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A layout file could not be read or written.
    #[error("layout file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for dock operations.
pub type DockResult<T> = Result<T, DockError>;
