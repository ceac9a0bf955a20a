//! Tracing integration for structured logging
//!
//! The library emits `tracing` events on lifecycle transitions,
//! persistence operations and benign degradations. Embedding
//! applications usually install their own subscriber; [`init_tracing`]
//! is the batteries-included path for binaries and examples.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global flag indicating whether tracing has been initialized
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TraceError {
    /// Failed to initialize the tracing subscriber
    #[error("failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing already initialized
    #[error("tracing has already been initialized")]
    AlreadyInitialized,
}

/// Result type for tracing operations
pub type TraceResult<T> = Result<T, TraceError>;

/// Log level for [`init_tracing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings and info (default)
    #[default]
    Info,
    /// All above plus debug messages
    Debug,
    /// All messages including trace
    Trace,
}

impl TraceLevel {
    /// Converts to the tracing crate's `Level`
    #[must_use]
    pub const fn to_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl std::str::FromStr for TraceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Initializes a stderr fmt subscriber filtered to the dock crates at
/// the given level. The `RUST_LOG` environment variable, when set,
/// overrides the level.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error when tracing was already initialized or the
/// subscriber fails to install.
pub fn init_tracing(level: TraceLevel) -> TraceResult<()> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TraceError::AlreadyInitialized);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!("dockit_core={level},dockit_cli={level}"))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| TraceError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %level, "tracing initialized");
    Ok(())
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
