//! Memory-hard hash backends: Argon2id and scrypt.
//!
//! Both run with a constant all-zero salt. The derivation preimage already
//! carries unique salting material (purpose tag and recipe text), so the
//! primitive's own salt slot stays fixed; varying it would break
//! reproducibility of previously derived secrets.
//!
//! Cost mapping:
//! - Argon2id: `passes` is t_cost, the memory limit becomes m_cost in KiB,
//!   one lane.
//! - scrypt: r is fixed at 8, `passes` maps to p, and N is the largest
//!   power of two with `128 * r * N` within the memory limit.

use argon2::{Algorithm, Argon2, Params as Argon2Params, Version};
use scrypt::Params as ScryptParams;

use crate::{buffer::SecureBuffer, error::CryptoError};

/// Constant salt for both backends; uniqueness comes from the preimage.
const ZERO_SALT: [u8; 16] = [0u8; 16];

/// Argon2id primitive floor for output length, in bytes.
const ARGON2_MIN_OUTPUT: usize = 4;

/// Fixed scrypt block-size factor.
const SCRYPT_R: u32 = 8;

/// Hash `message` to `output_length` bytes with Argon2id.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedOutputLength`] when `output_length` is
///   below the primitive's 4-byte floor or above `u32::MAX`
/// - [`CryptoError::InvalidCostParameters`] when the primitive rejects the
///   pass count or memory size
/// - [`CryptoError::ResourceExhausted`] when the memory limit exceeds what
///   the primitive can address
pub fn argon2id(
    message: &[u8],
    output_length: usize,
    passes: u32,
    memory_limit_in_bytes: u64,
) -> Result<SecureBuffer, CryptoError> {
    if output_length < ARGON2_MIN_OUTPUT || output_length > u32::MAX as usize {
        return Err(CryptoError::UnsupportedOutputLength {
            function: "Argon2id",
            requested: output_length,
            min: ARGON2_MIN_OUTPUT,
            max: u32::MAX as usize,
        });
    }

    let Ok(m_cost_kib) = u32::try_from(memory_limit_in_bytes / 1024) else {
        return Err(CryptoError::ResourceExhausted { function: "Argon2id" });
    };

    let params = Argon2Params::new(m_cost_kib, passes, 1, Some(output_length))
        .map_err(|e| map_argon2_error("Argon2id", output_length, e))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = SecureBuffer::zeroed(output_length);
    argon2
        .hash_password_into(message, &ZERO_SALT, out.as_mut_bytes())
        .map_err(|e| map_argon2_error("Argon2id", output_length, e))?;
    Ok(out)
}

/// Hash `message` to `output_length` bytes with scrypt.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedOutputLength`] when `output_length` is zero
/// - [`CryptoError::InvalidCostParameters`] when the derived (log_n, r, p)
///   triple is rejected by the primitive
pub fn scrypt(
    message: &[u8],
    output_length: usize,
    passes: u32,
    memory_limit_in_bytes: u64,
) -> Result<SecureBuffer, CryptoError> {
    if output_length == 0 {
        return Err(CryptoError::UnsupportedOutputLength {
            function: "Scrypt",
            requested: output_length,
            min: 1,
            max: usize::MAX,
        });
    }

    // 128 * r bytes per cost block; N must be a power of two >= 2
    let n_blocks = (memory_limit_in_bytes / (128 * u64::from(SCRYPT_R))).max(2);
    let log_n = n_blocks.ilog2() as u8;

    // The `len` slot only feeds the PHC-string API; scrypt() below sizes
    // its output from the slice we hand it.
    let params = ScryptParams::new(log_n, SCRYPT_R, passes, 32).map_err(|e| {
        CryptoError::InvalidCostParameters { function: "Scrypt", reason: e.to_string() }
    })?;

    let mut out = SecureBuffer::zeroed(output_length);
    scrypt::scrypt(message, &ZERO_SALT, &params, out.as_mut_bytes()).map_err(|_| {
        CryptoError::UnsupportedOutputLength {
            function: "Scrypt",
            requested: output_length,
            min: 1,
            max: usize::MAX,
        }
    })?;
    Ok(out)
}

fn map_argon2_error(function: &'static str, requested: usize, err: argon2::Error) -> CryptoError {
    match err {
        argon2::Error::MemoryTooMuch => CryptoError::ResourceExhausted { function },
        argon2::Error::OutputTooShort | argon2::Error::OutputTooLong => {
            CryptoError::UnsupportedOutputLength {
                function,
                requested,
                min: ARGON2_MIN_OUTPUT,
                max: u32::MAX as usize,
            }
        },
        other => CryptoError::InvalidCostParameters { function, reason: other.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small cost settings keep the suite fast; determinism and length are
    // what matter here, not hardness.
    const TEST_MEMORY: u64 = 65536;

    #[test]
    fn argon2id_is_deterministic() {
        let a = argon2id(b"preimage", 32, 1, TEST_MEMORY).unwrap();
        let b = argon2id(b"preimage", 32, 1, TEST_MEMORY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn argon2id_cost_parameters_change_output() {
        let one_pass = argon2id(b"preimage", 32, 1, TEST_MEMORY).unwrap();
        let two_passes = argon2id(b"preimage", 32, 2, TEST_MEMORY).unwrap();
        assert_ne!(one_pass, two_passes);
    }

    #[test]
    fn argon2id_rejects_tiny_output() {
        let result = argon2id(b"preimage", 3, 1, TEST_MEMORY);
        assert!(matches!(result, Err(CryptoError::UnsupportedOutputLength { requested: 3, .. })));
    }

    #[test]
    fn argon2id_rejects_zero_passes() {
        let result = argon2id(b"preimage", 32, 0, TEST_MEMORY);
        assert!(matches!(result, Err(CryptoError::InvalidCostParameters { .. })));
    }

    #[test]
    fn scrypt_is_deterministic() {
        let a = scrypt(b"preimage", 64, 1, 32768).unwrap();
        let b = scrypt(b"preimage", 64, 1, 32768).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn scrypt_memory_limit_changes_output() {
        let small = scrypt(b"preimage", 32, 1, 32768).unwrap();
        let large = scrypt(b"preimage", 32, 1, 65536).unwrap();
        assert_ne!(small, large);
    }

    #[test]
    fn scrypt_rejects_empty_output() {
        let result = scrypt(b"preimage", 0, 1, 32768);
        assert!(matches!(result, Err(CryptoError::UnsupportedOutputLength { requested: 0, .. })));
    }

    #[test]
    fn scrypt_rejects_zero_passes() {
        let result = scrypt(b"preimage", 32, 0, 32768);
        assert!(matches!(result, Err(CryptoError::InvalidCostParameters { .. })));
    }

    #[test]
    fn backends_differ_on_same_input() {
        let a = argon2id(b"preimage", 32, 1, TEST_MEMORY).unwrap();
        let s = scrypt(b"preimage", 32, 1, TEST_MEMORY).unwrap();
        assert_ne!(a, s);
    }
}
