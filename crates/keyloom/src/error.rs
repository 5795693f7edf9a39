//! Umbrella error for the high-level API.
//!
//! The lower layers keep their own error types; this enum only forwards
//! them, preserving the kind distinctions so callers can reject a bad
//! recipe immediately while treating an unseal failure as access denied.

use thiserror::Error;

/// Errors surfaced by derivation, key objects and sealing.
#[derive(Error, Debug)]
pub enum KeyError {
    /// Recipe or instruction text failed parsing or validation.
    #[error(transparent)]
    Recipe(#[from] keyloom_recipe::RecipeError),

    /// A hash backend or sealing protocol failed.
    #[error(transparent)]
    Crypto(#[from] keyloom_crypto::CryptoError),

    /// A container form failed to encode or decode.
    #[error(transparent)]
    Package(#[from] keyloom_proto::PackageError),

    /// Reconstitution received key material of the wrong size.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required length for this key type
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}
