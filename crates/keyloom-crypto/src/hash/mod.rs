//! One-way hash backends with caller-chosen output length.
//!
//! Uniform contract: `hash(message, output_length)` produces exactly
//! `output_length` bytes, deterministically. The backend set is closed;
//! a recipe's resolved hash function id maps onto exactly one variant.
//!
//! # Invariants
//!
//! - Determinism: same (backend, message, length) always yields the same
//!   bytes, across runs and processes.
//! - Exact length: the returned buffer holds `output_length` bytes or the
//!   call fails; no backend rounds up or pads.

pub mod fixed_block;
pub mod hkdf_expand;
pub mod memory_hard;

use crate::{buffer::SecureBuffer, error::CryptoError};

/// Block primitive backing the fixed-block hash.
///
/// Both produce a 32-byte block; outputs beyond one block use the
/// hash-chain expansion in [`fixed_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPrimitive {
    /// SHA-256
    Sha256,
    /// BLAKE2b with 256-bit output
    Blake2b256,
}

/// Closed set of hash backends.
///
/// No open extensibility: the variant set is fixed by the recipe schema,
/// and dispatch is a match on the resolved id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunction {
    /// Fixed 32-byte block hash with hash-chain length extension.
    FixedBlock(BlockPrimitive),

    /// Argon2id with caller-supplied cost parameters and a constant salt.
    Argon2id {
        /// Number of passes over memory (t_cost)
        passes: u32,
        /// Working memory budget in bytes
        memory_limit_in_bytes: u64,
    },

    /// Scrypt with caller-supplied cost parameters and a constant salt.
    Scrypt {
        /// Parallelization factor, mapped from the recipe's pass count
        passes: u32,
        /// Working memory budget in bytes
        memory_limit_in_bytes: u64,
    },

    /// RFC5869 expand-only derivation over BLAKE2b-256.
    ///
    /// Under the uniform contract the whole message is the input keying
    /// material and the info string is empty; the derivation pipeline
    /// calls [`hkdf_expand::expand`] directly when it wants a separate
    /// info string.
    HkdfBlake2b,
}

impl HashFunction {
    /// Hash `message` to exactly `output_length` bytes.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedOutputLength`] when `output_length` is
    ///   outside the selected backend's bounds
    /// - [`CryptoError::InvalidCostParameters`] when the primitive rejects
    ///   the memory-hard cost settings
    /// - [`CryptoError::ResourceExhausted`] when the primitive cannot
    ///   obtain its working memory
    pub fn hash(&self, message: &[u8], output_length: usize) -> Result<SecureBuffer, CryptoError> {
        match *self {
            Self::FixedBlock(primitive) => fixed_block::hash(primitive, message, output_length),
            Self::Argon2id { passes, memory_limit_in_bytes } => {
                memory_hard::argon2id(message, output_length, passes, memory_limit_in_bytes)
            },
            Self::Scrypt { passes, memory_limit_in_bytes } => {
                memory_hard::scrypt(message, output_length, passes, memory_limit_in_bytes)
            },
            Self::HkdfBlake2b => hkdf_expand::expand(message, &[], output_length),
        }
    }
}
