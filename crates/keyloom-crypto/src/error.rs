//! Error types for the cryptographic primitives.
//!
//! Verification failures are deliberately a single variant: callers must
//! not be able to distinguish a wrong key from altered instructions or a
//! corrupted ciphertext through the error type. The cause appears only in
//! the message, for logs.

use thiserror::Error;

/// Errors produced by the hash backends and sealing protocols.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Requested output length is outside the backend's supported bounds.
    #[error("{function} cannot produce {requested} bytes (supported: {min}..={max})")]
    UnsupportedOutputLength {
        /// Backend that rejected the request
        function: &'static str,
        /// Output length that was requested
        requested: usize,
        /// Smallest supported output length
        min: usize,
        /// Largest supported output length
        max: usize,
    },

    /// Cost parameters rejected by the underlying primitive.
    #[error("invalid cost parameters for {function}: {reason}")]
    InvalidCostParameters {
        /// Backend that rejected the parameters
        function: &'static str,
        /// Primitive-reported reason
        reason: String,
    },

    /// The underlying primitive could not obtain its working memory.
    #[error("{function} exhausted available memory")]
    ResourceExhausted {
        /// Backend that ran out of memory
        function: &'static str,
    },

    /// Authenticated decryption or context binding failed.
    ///
    /// Wrong key, altered instructions, corrupted ciphertext and truncated
    /// input all surface here; only the message differs.
    #[error("cryptographic verification failed: {reason}")]
    Verification {
        /// Human-readable cause, for diagnostics only
        reason: &'static str,
    },
}
