//! Symmetric sealing: secretbox with a keyed, message-dependent nonce.
//!
//! The nonce is `H24(key || instructions || message)`, so distinct
//! messages under the same key can never silently share a nonce. The wire
//! form is `nonce(24) || ciphertext+tag`.
//!
//! Unsealing decrypts with the embedded nonce, then RE-derives the nonce
//! from the key, the supplied instruction text and the recovered
//! plaintext, and compares it to the embedded one in constant time. The
//! AEAD alone does not authenticate the instruction text; this second
//! check is what binds it, and a mismatch fails even when the tag
//! verified.

use crypto_secretbox::{
    XSalsa20Poly1305,
    aead::{Aead, KeyInit, generic_array::GenericArray},
};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::{NONCE_SIZE, TAG_SIZE, derive_nonce};
use crate::error::CryptoError;

/// XSalsa20-Poly1305 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Seal `plaintext` under `key`, binding `unsealing_instructions`.
///
/// Returns `nonce(24) || ciphertext+tag`. Fully deterministic: the same
/// (key, instructions, message) triple always produces the same bytes.
pub fn seal(plaintext: &[u8], key: &[u8; KEY_SIZE], unsealing_instructions: &str) -> Vec<u8> {
    let nonce = derive_nonce(&[key, unsealing_instructions.as_bytes(), plaintext]);

    let cipher = XSalsa20Poly1305::new(key.into());
    let Ok(ciphertext) = cipher.encrypt(GenericArray::from_slice(&nonce), plaintext) else {
        unreachable!("XSalsa20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    out
}

/// Unseal a message produced by [`seal`].
///
/// # Errors
///
/// - [`CryptoError::Verification`] for every failure mode: short input,
///   wrong key, corrupted ciphertext, or an instruction text that does not
///   reproduce the embedded nonce
pub fn unseal(
    sealed: &[u8],
    key: &[u8; KEY_SIZE],
    unsealing_instructions: &str,
) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Verification { reason: "sealed message too short" });
    }

    let (embedded_nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

    let cipher = XSalsa20Poly1305::new(key.into());
    let mut plaintext = cipher
        .decrypt(GenericArray::from_slice(embedded_nonce), ciphertext)
        .map_err(|_| CryptoError::Verification { reason: "authenticated decryption failed" })?;

    // The tag verified, but the embedded nonce is attacker-controlled
    // input; only re-derivation proves the instruction text matches.
    let expected_nonce = derive_nonce(&[key, unsealing_instructions.as_bytes(), &plaintext]);
    if !bool::from(expected_nonce.ct_eq(embedded_nonce)) {
        plaintext.zeroize();
        return Err(CryptoError::Verification { reason: "instruction binding mismatch" });
    }

    Ok(plaintext)
}
