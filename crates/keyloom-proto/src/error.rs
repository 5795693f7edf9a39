//! Error types for container encoding and decoding.

use thiserror::Error;

/// Errors produced while encoding or decoding a packaged sealed message.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Input ended before the bytes its length prefixes promised.
    #[error("container truncated: needed {needed} more bytes")]
    Truncated {
        /// How many bytes were missing
        needed: usize,
    },

    /// Input continued past the last field.
    #[error("container has {count} trailing bytes")]
    TrailingBytes {
        /// How many bytes followed the final field
        count: usize,
    },

    /// A field exceeds the 4 GiB length-prefix limit.
    #[error("field `{field}` is too large for the container ({size} bytes)")]
    FieldTooLarge {
        /// Field that overflowed
        field: &'static str,
        /// Actual size in bytes
        size: usize,
    },

    /// A text field held invalid UTF-8.
    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 {
        /// Field that failed decoding
        field: &'static str,
    },

    /// The JSON container form was malformed.
    #[error("JSON container parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The hex-encoded ciphertext was malformed.
    #[error("invalid hex in ciphertext field: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
