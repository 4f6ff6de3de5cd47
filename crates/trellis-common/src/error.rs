//! Error taxonomy shared by all Trellis crates.
//!
//! Only two kinds of failure exist. Both are unrecoverable at the point they
//! are raised: the caller has to fix the tree and try again.

use thiserror::Error;

/// Failure raised by a builder or by the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A required constructor or setter argument was empty or malformed.
    ///
    /// Raised synchronously while the tree is being built, never while it
    /// is being rendered.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Human readable description of the problem.
        reason: String,
    },

    /// A render-time precondition did not hold.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
}

impl MarkupError {
    /// Shorthand for [`MarkupError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`MarkupError::InconsistentState`].
    #[must_use]
    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::InconsistentState(message.into())
    }
}

/// Result alias used throughout Trellis.
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Fail with [`MarkupError::InvalidArgument`] when `value` is empty.
///
/// # Errors
///
/// Returns `InvalidArgument` naming `name` if `value` is the empty string.
pub fn require_non_empty(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(MarkupError::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}
