//! Error types for the Plaza3D engine
//!
//! This module defines the error type shared by configuration validation,
//! scene assembly, asset loading and the render backend seam.
//! Per-frame simulation code never produces errors; everything here is
//! raised at setup time or at the collaborator boundaries.

use std::fmt;

/// Result type for Plaza3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Plaza3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Configuration precondition violated (bounds, LOD levels, camera limits)
    InvalidConfig(String),

    /// Invalid or unknown resource (scene name, node key, LOD group)
    InvalidResource(String),

    /// Asynchronous asset load failed (network or parse error)
    AssetLoadFailed {
        /// Resource locator that was requested
        locator: String,
        /// Failure reason reported by the loader
        reason: String,
    },

    /// Initialization failed (scene assembly, subsystems)
    InitializationFailed(String),

    /// Render backend error reported on frame submission
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::AssetLoadFailed { locator, reason } => {
                write!(f, "Asset load failed for '{}': {}", locator, reason)
            }
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("plaza3d::FrameDriver", "submit failed: {}", reason));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::plaza3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log an ERROR and build an `Error::InvalidConfig` from the same message
#[macro_export]
macro_rules! config_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::plaza3d::Error::InvalidConfig(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
