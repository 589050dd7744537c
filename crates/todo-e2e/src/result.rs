//! Result and error types for the TodoMVC suite.

use thiserror::Error;

/// Result type for suite operations
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors that can occur while driving or verifying the application
#[derive(Debug, Error)]
pub enum TodoError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error (target creation, script evaluation, CDP failures)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Targeted element did not exist for the whole wait window
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator description
        locator: String,
    },

    /// Observed state never matched the expectation
    #[error(
        "Assertion failed: {description}: expected {expected}, got {actual} \
         ({attempts} attempt(s) in {elapsed_ms}ms)"
    )]
    AssertionFailed {
        /// What was being verified
        description: String,
        /// Expected value, rendered
        expected: String,
        /// Last observed value, rendered
        actual: String,
        /// Number of polls made
        attempts: usize,
        /// Time spent polling
        elapsed_ms: u64,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Client-side storage could not be read or decoded
    #[error("Storage error: {message}")]
    StorageError {
        /// Error message
        message: String,
    },

    /// Fixture error (setup failed)
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// A named step failed
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        /// Step label
        step: String,
        /// Underlying failure
        #[source]
        source: Box<TodoError>,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl TodoError {
    /// Create a page error from any displayable CDP failure
    pub fn page(err: impl std::fmt::Display) -> Self {
        Self::PageError {
            message: err.to_string(),
        }
    }

    /// Create an input error from any displayable CDP failure
    pub fn input(err: impl std::fmt::Display) -> Self {
        Self::InputError {
            message: err.to_string(),
        }
    }

    /// Whether polling again could change the outcome
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::AssertionFailed { .. } | Self::InputError { .. }
        )
    }

    /// The innermost error, looking through step wrappers
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_message_carries_expected_and_actual() {
        let err = TodoError::AssertionFailed {
            description: "todo titles".to_string(),
            expected: "[\"a\"]".to_string(),
            actual: "[]".to_string(),
            attempts: 3,
            elapsed_ms: 250,
        };
        let msg = err.to_string();
        assert!(msg.contains("todo titles"));
        assert!(msg.contains("expected [\"a\"]"));
        assert!(msg.contains("got []"));
        assert!(msg.contains("3 attempt(s)"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(TodoError::ElementNotFound {
            locator: ".toggle".to_string()
        }
        .is_retryable());
        assert!(!TodoError::NavigationError {
            url: "x".to_string(),
            message: "y".to_string()
        }
        .is_retryable());
        assert!(!TodoError::page("boom").is_retryable());
    }

    #[test]
    fn test_root_unwraps_nested_steps() {
        let inner = TodoError::ElementNotFound {
            locator: ".edit".to_string(),
        };
        let wrapped = TodoError::StepFailed {
            step: "outer".to_string(),
            source: Box::new(TodoError::StepFailed {
                step: "inner".to_string(),
                source: Box::new(inner),
            }),
        };
        assert!(matches!(wrapped.root(), TodoError::ElementNotFound { .. }));
        assert!(wrapped.to_string().starts_with("Step 'outer' failed"));
    }

    #[test]
    fn test_json_conversion() {
        let err: TodoError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, TodoError::Json(_)));
    }
}
