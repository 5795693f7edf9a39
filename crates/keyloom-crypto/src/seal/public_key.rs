//! Public-key sealing: an ephemeral-key sealed box bound to instructions.
//!
//! Sealing generates one ephemeral X25519 key pair per message (the
//! caller provides the 32 random bytes, keeping this function pure) and
//! derives the nonce as
//! `H24(ephemeralPublicKey || recipientPublicKey || instructions)`, with
//! the instructions segment omitted when empty. The wire form is
//! `ephemeralPublicKey(32) || ciphertext+tag`.
//!
//! Unsealing recomputes the nonce from the embedded ephemeral public key,
//! the holder's own public key and the caller-supplied instruction text.
//! A wrong private key, altered instructions or a corrupted ciphertext all
//! fail with the same error kind.

use crypto_box::{PublicKey, SalsaBox, SecretKey, aead::Aead, aead::generic_array::GenericArray};
use zeroize::Zeroize;

use super::{NONCE_SIZE, TAG_SIZE, derive_nonce};
use crate::error::CryptoError;

/// X25519 public and secret key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Compute the X25519 public key for a 32-byte secret scalar.
///
/// Deterministic: the public half of a derived key pair is fixed by the
/// derived seed.
pub fn public_key_for_secret(secret: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let secret_key = SecretKey::from(*secret);
    *secret_key.public_key().as_bytes()
}

/// Seal `plaintext` to `recipient_public`, binding `unsealing_instructions`.
///
/// `ephemeral_secret` must be 32 fresh random bytes; it is consumed and
/// wiped. Returns `ephemeralPublicKey || ciphertext+tag`.
pub fn seal(
    plaintext: &[u8],
    recipient_public: &[u8; KEY_SIZE],
    unsealing_instructions: &str,
    mut ephemeral_secret: [u8; KEY_SIZE],
) -> Vec<u8> {
    let ephemeral = SecretKey::from(ephemeral_secret);
    ephemeral_secret.zeroize();

    let ephemeral_public = ephemeral.public_key();
    let recipient = PublicKey::from(*recipient_public);
    let nonce =
        nonce_for(ephemeral_public.as_bytes(), recipient.as_bytes(), unsealing_instructions);

    let sealed_box = SalsaBox::new(&recipient, &ephemeral);
    let Ok(ciphertext) = sealed_box.encrypt(GenericArray::from_slice(&nonce), plaintext) else {
        unreachable!("XSalsa20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut out = Vec::with_capacity(KEY_SIZE + ciphertext.len());
    out.extend_from_slice(ephemeral_public.as_bytes());
    out.extend_from_slice(&ciphertext);
    out
}

/// Unseal a message produced by [`seal`].
///
/// # Errors
///
/// - [`CryptoError::Verification`] for every failure mode: short input,
///   wrong private key, altered instructions, corrupted ciphertext
pub fn unseal(
    sealed: &[u8],
    recipient_secret: &[u8; KEY_SIZE],
    unsealing_instructions: &str,
) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < KEY_SIZE + TAG_SIZE {
        return Err(CryptoError::Verification { reason: "sealed message too short" });
    }

    let (ephemeral_bytes, ciphertext) = sealed.split_at(KEY_SIZE);
    let Ok(ephemeral_array) = <[u8; KEY_SIZE]>::try_from(ephemeral_bytes) else {
        unreachable!("split_at produces exactly KEY_SIZE bytes");
    };
    let ephemeral_public = PublicKey::from(ephemeral_array);

    let secret_key = SecretKey::from(*recipient_secret);
    let own_public = secret_key.public_key();
    let nonce =
        nonce_for(ephemeral_public.as_bytes(), own_public.as_bytes(), unsealing_instructions);

    let sealed_box = SalsaBox::new(&ephemeral_public, &secret_key);
    sealed_box
        .decrypt(GenericArray::from_slice(&nonce), ciphertext)
        .map_err(|_| CryptoError::Verification { reason: "authenticated decryption failed" })
}

fn nonce_for(
    ephemeral_public: &[u8; KEY_SIZE],
    recipient_public: &[u8; KEY_SIZE],
    unsealing_instructions: &str,
) -> [u8; NONCE_SIZE] {
    if unsealing_instructions.is_empty() {
        derive_nonce(&[ephemeral_public, recipient_public])
    } else {
        derive_nonce(&[ephemeral_public, recipient_public, unsealing_instructions.as_bytes()])
    }
}
