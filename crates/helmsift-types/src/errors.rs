//! Error types for helmsift operations.

use thiserror::Error;

/// The main error type for helmsift operations.
///
/// Rendering failures are kept apart from everything else so the CLI can
/// report the rendering tool's diagnostics verbatim.
#[derive(Error, Debug)]
pub enum HelmsiftError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The rendering tool ran but exited unsuccessfully.
    ///
    /// `stderr` is the tool's captured diagnostic output, untouched.
    #[error("Rendering tool exited with status {status}:\n{stderr}")]
    Render {
        /// Exit code, or -1 when the process was terminated by a signal
        status: i32,
        /// Captured standard error of the tool
        stderr: String,
    },

    /// The rendering tool could not be started at all
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal bug - should never happen in production
    #[error("Bug detected: {0}\n\nThis is an internal error. Please report this issue at:\nhttps://github.com/helmsift/helmsift/issues")]
    Bug(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl HelmsiftError {
    /// Whether this error came from the rendering tool itself.
    pub fn is_render_failure(&self) -> bool {
        matches!(self, HelmsiftError::Render { .. })
    }
}

/// A specialized Result type for helmsift operations.
pub type Result<T> = std::result::Result<T, HelmsiftError>;

/// Helper macro to bail out with a HelmsiftError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if !valid {
///     bail!(Validation, "Invalid namespace: {}", reason);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::HelmsiftError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::HelmsiftError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::HelmsiftError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::HelmsiftError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_validation(value: &str) -> Result<()> {
        bail!(Validation, "bad value: {}", value);
    }

    #[test]
    fn test_render_error_keeps_stderr_verbatim() {
        let err = HelmsiftError::Render {
            status: 1,
            stderr: "Error: repo jetstack not found\n".to_string(),
        };
        assert!(err.is_render_failure());
        assert!(err.to_string().ends_with("Error: repo jetstack not found\n"));
    }

    #[test]
    fn test_bail_macro() {
        let err = failing_validation("x").unwrap_err();
        assert!(matches!(err, HelmsiftError::Validation(ref m) if m == "bad value: x"));
        assert!(!err.is_render_failure());
    }
}
