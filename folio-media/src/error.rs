use std::time::Duration;

use thiserror::Error;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while checking media
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media file not found: {filename}")]
    NotFound { filename: String },

    #[error("Invalid media filename: {message}")]
    Invalid { message: String },

    #[error("Media check timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Media check unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MediaError {
    /// Create an invalid filename error
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(filename: S) -> Self {
        Self::NotFound {
            filename: filename.into(),
        }
    }

    /// Create a timeout error; durations past `u64::MAX` ms saturate.
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            millis: u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create an unavailable error
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// True when the check itself broke, as opposed to a definite
    /// answer that the file cannot exist.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            MediaError::Timeout { .. } | MediaError::Unavailable { .. } | MediaError::Io { .. }
        )
    }
}
