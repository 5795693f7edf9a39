//! RFC5869-style expand-only derivation over BLAKE2b-256.
//!
//! The extraction salt is deliberately absent (all-zero per the RFC's
//! default): the input keying material is the caller-held secret and the
//! info string already supplies context separation. Output blocks chain
//! `T(i) = HMAC(PRK, T(i-1) || info || i)` and are concatenated then
//! truncated to the requested length.

use blake2::{Blake2b, digest::consts::U32};
use hkdf::SimpleHkdf;

use crate::{buffer::SecureBuffer, error::CryptoError};

type Blake2b256 = Blake2b<U32>;

/// Largest producible output: 255 blocks of 32 bytes (RFC5869 bound).
pub const MAX_OUTPUT_LEN: usize = 255 * 32;

/// Expand `ikm` to `output_length` bytes under the given info string.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedOutputLength`] when `output_length` is zero
///   or beyond the 8160-byte RFC bound
pub fn expand(ikm: &[u8], info: &[u8], output_length: usize) -> Result<SecureBuffer, CryptoError> {
    if output_length == 0 || output_length > MAX_OUTPUT_LEN {
        return Err(CryptoError::UnsupportedOutputLength {
            function: "HKDF-BLAKE2b",
            requested: output_length,
            min: 1,
            max: MAX_OUTPUT_LEN,
        });
    }

    let hkdf = SimpleHkdf::<Blake2b256>::new(None, ikm);
    let mut out = SecureBuffer::zeroed(output_length);
    let Ok(()) = hkdf.expand(info, out.as_mut_bytes()) else {
        unreachable!("output length bound checked above");
    };
    Ok(out)
}
