//! Keyloom Cryptographic Primitives
//!
//! Cryptographic building blocks for keyloom. Pure functions with
//! deterministic outputs. Callers provide random bytes for deterministic
//! testing.
//!
//! # Derivation Substrate
//!
//! This section describes how raw secret bytes flow through the crate.
//! A derivation pipeline (one layer up) builds a preimage from a seed
//! string and a recipe, selects one of the hash backends here, and
//! receives the requested number of bytes in a [`SecureBuffer`]. Sealing
//! then binds a ciphertext to the context that produced the key.
//!
//! ```text
//! Preimage (seed + purpose + recipe)
//!        │
//!        ▼
//! HashFunction → raw secret bytes (SecureBuffer)
//!        │
//!        ▼
//! Sealing → nonce derived from context, AEAD ciphertext
//! ```
//!
//! # Security
//!
//! Secret hygiene:
//! - Every buffer of secret bytes lives in a [`SecureBuffer`], wiped on drop
//! - Buffers are move-only; borrowing grants read access for one call
//! - Intermediate preimage copies are wiped before returning
//!
//! Context binding:
//! - Public-key sealing derives the nonce from both public keys and the
//!   unsealing instruction text
//! - Symmetric sealing recomputes the nonce from the recovered plaintext,
//!   so an altered instruction text fails even when the AEAD tag verifies
//! - All unsealing failures report one error kind, never the cause
//!
//! Determinism:
//! - Every hash backend is a pure function of (message, output length)
//! - The fixed-block expansion is prefix-stable: requesting more bytes
//!   never changes the bytes already produced

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod buffer;
pub mod error;
pub mod hash;
pub mod seal;

pub use buffer::SecureBuffer;
pub use error::CryptoError;
pub use hash::{BlockPrimitive, HashFunction};
