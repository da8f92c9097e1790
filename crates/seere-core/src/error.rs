//! Error types for block streams.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
///
/// Every frame-validation failure surfaces as [`Error::Corrupted`];
/// bytes found after the end-of-stream block surface as
/// [`Error::UnexpectedTrailingData`]. Both are terminal for the stream
/// they occur on.
#[derive(Debug, Error)]
pub enum Error {
    /// A frame failed validation, or the stream ended mid-frame.
    #[error("corrupted stream: {message}")]
    Corrupted {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Bytes remained, or kept arriving, after the end-of-stream block.
    #[error("unexpected data after end-of-stream block")]
    UnexpectedTrailingData,

    /// Input ran out inside a compressed block.
    #[error("unexpected end of input after {bytes_read} bytes")]
    UnexpectedEof { bytes_read: usize },

    /// Output buffer too small for the data being produced.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}: must be in range [{min}, {max}]")]
    InvalidLevel { level: i32, min: i32, max: i32 },

    /// Failure reported by the input side of a stream, passed through.
    #[error("upstream failure")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The output side of a stream stopped accepting data.
    #[error("downstream failure: {message}")]
    Downstream { message: String },
}

impl Error {
    /// Create a corrupted-stream error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::Corrupted {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupted-stream error with offset context.
    pub fn corrupted_at(message: impl Into<String>, offset: usize) -> Self {
        Error::Corrupted {
            message: format!("{} at offset {}", message.into(), offset),
            source: None,
        }
    }

    /// Create a corrupted-stream error wrapping its cause.
    pub fn corrupted_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Corrupted {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bytes_read: usize) -> Self {
        Error::UnexpectedEof { bytes_read }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Create an invalid compression level error.
    pub fn invalid_level(level: i32, min: i32, max: i32) -> Self {
        Error::InvalidLevel { level, min, max }
    }

    /// Create an upstream error wrapping the collaborator's cause.
    pub fn upstream(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Upstream(source.into())
    }

    /// Create a downstream error.
    pub fn downstream(message: impl Into<String>) -> Self {
        Error::Downstream {
            message: message.into(),
        }
    }

    /// Check whether this error marks the stream as corrupted.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Error::Corrupted { .. })
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Corrupted { .. } => "corrupted",
            Error::UnexpectedTrailingData => "trailing_data",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::InvalidLevel { .. } => "invalid_level",
            Error::Upstream(_) => "upstream",
            Error::Downstream { .. } => "downstream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_display_includes_message() {
        let err = Error::corrupted("invalid magic bytes");
        assert!(err.to_string().contains("corrupted stream"));
        assert!(err.to_string().contains("invalid magic bytes"));
        assert!(err.is_corrupted());
    }

    #[test]
    fn corrupted_with_preserves_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad token");
        let err = Error::corrupted_with("malformed compressed block", cause);
        assert!(err.is_corrupted());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn trailing_data_is_not_corrupted() {
        let err = Error::UnexpectedTrailingData;
        assert!(!err.is_corrupted());
        assert_eq!(err.category(), "trailing_data");
    }

    #[test]
    fn categories_are_distinct() {
        let errors = [
            Error::corrupted("x"),
            Error::UnexpectedTrailingData,
            Error::unexpected_eof(3),
            Error::buffer_too_small(10, 5),
            Error::invalid_level(8, 9, 17),
            Error::upstream(std::io::Error::other("boom")),
            Error::downstream("closed"),
        ];
        let mut categories: Vec<_> = errors.iter().map(|e| e.category()).collect();
        categories.sort_unstable();
        categories.dedup();
        assert_eq!(categories.len(), errors.len());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
