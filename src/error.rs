//! Error types for the pixelshift library.
//!
//! Every failure here is recoverable at the pipeline boundary: the
//! [`crate::ConversionPipeline`] records the error, surfaces its display
//! string as the user-visible message, and returns to an actionable state —
//! the caller may retry immediately. Nothing is fatal to the process.
//!
//! Display strings therefore carry a remediation hint on a second line,
//! ready to show in a message slot as-is.

use thiserror::Error;

/// All errors returned by the pixelshift library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    // ── Selection errors ──────────────────────────────────────────────────
    /// The declared media type does not indicate an image.
    #[error("'{media_type}' is not an image media type\nSelect a file with an image/* media type.")]
    InvalidFileType { media_type: String },

    /// The file exceeds the configured size cap.
    ///
    /// Checked before the media type, so an oversized file always reports
    /// this variant regardless of what it claims to be.
    #[error("file is {size} bytes, over the {limit} byte limit\nChoose a smaller image.")]
    FileTooLarge { size: u64, limit: u64 },

    /// The requested target format has no native encoder.
    #[error("no encoder available for '{format}'\nUse a dedicated imaging application for this format.")]
    UnsupportedFormat { format: String },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// The source bytes do not form a decodable image, whatever the
    /// declared media type said.
    #[error("failed to load image: {detail}\nTry a different file.")]
    DecodeFailure { detail: String },

    /// Encoding the composed surface failed.
    #[error("conversion failed: {detail}\nPlease try again.")]
    EncodeFailure { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (a blocking task panicked or was aborted).
    #[error("Internal error: {0}")]
    Internal(String),
}
