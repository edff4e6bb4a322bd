//! Error types for escframe.

use thiserror::Error;

/// Main error type for all escframe operations.
///
/// Decoding itself never fails: malformed escapes drop the open frame
/// silently. These variants cover configuration, end-of-stream handling
/// and the async transport adapters.
#[derive(Debug, Error)]
pub enum EscFrameError {
    /// I/O error while reading from or writing to the byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while loading marker configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ESC and SOF were configured to the same byte value.
    #[error("ESC and SOF must differ (both are {byte:#04x})")]
    InvalidMarkers { byte: u8 },

    /// The stream ended while a frame was still open.
    #[error("Stream ended inside an open frame ({buffered} bytes discarded)")]
    TruncatedFrame { buffered: usize },

    /// The underlying writer accepted zero bytes.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using EscFrameError.
pub type Result<T> = std::result::Result<T, EscFrameError>;
