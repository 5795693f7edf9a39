//! Salted authenticated sealing and unsealing.
//!
//! Two parallel constructions, both binding the ciphertext to a free-form
//! unsealing-instructions string:
//!
//! - [`public_key`]: ephemeral-key sealed box over X25519 and
//!   XSalsa20-Poly1305; the nonce commits to both public keys and the
//!   instruction text.
//! - [`symmetric`]: XSalsa20-Poly1305 secretbox; the nonce commits to the
//!   key, the instruction text and the message itself, and is re-derived
//!   from the recovered plaintext at unseal time.
//!
//! Both are stateless pure functions over their inputs. Fresh randomness
//! enters only through the caller-provided ephemeral secret in
//! [`public_key::seal`].

pub mod public_key;
pub mod symmetric;

use zeroize::Zeroizing;

use crate::hash::{BlockPrimitive, fixed_block};

/// XSalsa20 nonce size shared by both constructions.
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size shared by both constructions.
pub const TAG_SIZE: usize = 16;

/// Derive a nonce by hashing the concatenated segments to 24 bytes.
///
/// Segments may include secret material, so the working concatenation is
/// wiped. Uses the fixed-block BLAKE2b backend truncated to the XSalsa20
/// nonce size.
pub(crate) fn derive_nonce(segments: &[&[u8]]) -> [u8; NONCE_SIZE] {
    let total: usize = segments.iter().map(|s| s.len()).sum();
    let mut message = Zeroizing::new(Vec::with_capacity(total));
    for segment in segments {
        message.extend_from_slice(segment);
    }

    let Ok(digest) = fixed_block::hash(BlockPrimitive::Blake2b256, &message, NONCE_SIZE) else {
        unreachable!("24 is a valid fixed-block output length");
    };

    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(digest.as_bytes());
    nonce
}
