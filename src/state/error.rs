//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The screen lock was poisoned by a panicking holder
    #[error("Screen lock poisoned")]
    ScreenLockPoisoned,

    /// The content builder lock was poisoned by a panicking holder
    #[error("Content builder lock poisoned")]
    BuilderLockPoisoned,

    /// Unknown theme requested
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}
