//! Error types for the screen buffer

/// Error type for screen buffer operations
#[derive(Debug, thiserror::Error)]
pub enum ScreenBufError {
    /// The line contained `\r` or `\n`, which would move the terminal
    /// cursor behind the buffer's back
    #[error("{line:?} should not contain either \\r or \\n")]
    InvalidInput { line: String },

    /// A write was attempted below the last drawn row
    #[error("invalid write cursor position ({cursor}) exceeded line height: {height}")]
    InvalidCursorPosition { cursor: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for screen buffer operations
pub type ScreenBufResult<T> = Result<T, ScreenBufError>;
