//! Keyloom container formats.
//!
//! A sealed message travels with the plaintext metadata needed to unseal
//! it again: the recipe text that reproduces the key and the instruction
//! text bound into the nonce. This crate packages the three parts into a
//! fixed binary container (length-prefixed byte strings) and a JSON form
//! (hex-encoded ciphertext), both safe to persist or transmit: the
//! metadata is not secret, and the ciphertext is authenticated.
//!
//! Decoding is structural only. A container that parses is not a
//! container that unseals; authentication happens one layer up.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod package;
pub mod wire;

pub use error::PackageError;
pub use package::PackagedSealedMessage;
