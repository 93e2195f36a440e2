//! Error types for the capture, annotate and export pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the compositing engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The capture source returned nothing or an unusable bitmap
    #[error("capture failed: {0}")]
    Input(String),

    #[error("cannot combine images: {0}")]
    Combine(String),

    /// Base image with a zero dimension handed to the renderer or a session
    #[error("invalid image dimensions ({width}x{height})")]
    InvalidImage { width: u32, height: u32 },

    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A dialog was dismissed. Not a failure, but it ends the current export attempt.
    #[error("cancelled by user")]
    UserCancelled,
}

impl EngineError {
    pub(crate) fn file_write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EngineError::FileWrite {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether the user can retry the operation with a different export target
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::ClipboardUnavailable(_)
                | EngineError::FileWrite { .. }
                | EngineError::UserCancelled
        )
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::Combine("no image to combine".to_string());
        assert_eq!(err.to_string(), "cannot combine images: no image to combine");

        let err = EngineError::InvalidImage {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "invalid image dimensions (0x12)");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(EngineError::ClipboardUnavailable("headless".into()).is_retryable());
        assert!(EngineError::UserCancelled.is_retryable());
        assert!(
            EngineError::file_write("/tmp/x.png", std::io::Error::other("disk full"))
                .is_retryable()
        );
        assert!(!EngineError::Combine("x".into()).is_retryable());
        assert!(!EngineError::Input("x".into()).is_retryable());
    }
}
