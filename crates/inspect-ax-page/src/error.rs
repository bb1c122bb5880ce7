//! Errors raised by page-side capabilities.
//!
//! None of these reach the user: callers degrade them to empty values or a
//! `false` copy outcome.

use thiserror::Error;

/// Failure of the platform accessibility computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeAccessibilityError {
    #[error("Native accessibility computation is not available")]
    Unavailable,

    #[error("Native accessibility computation failed: {0}")]
    Failed(String),
}

/// Failure of a clipboard write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard access denied")]
    Denied,

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}
