//! Assertions for page verification.
//!
//! A verification is a check that compares one observation of the page with
//! an expectation. Checks never wait; [`retry::poll_until`] re-runs them
//! until they pass or the expectation timeout elapses.

pub mod retry;

pub use retry::{poll_action, poll_until, RetryConfig, RetryResult};

use std::fmt::Debug;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionCheckResult {
    /// Observation matched
    Pass,
    /// Observation did not match
    Fail {
        /// Expected value, rendered
        expected: String,
        /// Observed value, rendered
        actual: String,
    },
}

impl AssertionCheckResult {
    /// Check if the result is a pass
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Failing result from rendered values
    #[must_use]
    pub fn fail(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Fail {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Pass when `actual == expected`
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(expected: &T, actual: &T) -> Self {
        if expected == actual {
            Self::Pass
        } else {
            Self::fail(format!("{expected:?}"), format!("{actual:?}"))
        }
    }

    /// Pass when `condition` holds, describing both sides in words
    #[must_use]
    pub fn holds(condition: bool, expected: &str, otherwise: &str) -> Self {
        if condition {
            Self::Pass
        } else {
            Self::fail(expected, otherwise)
        }
    }
}
