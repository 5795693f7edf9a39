//! Fixed-block hash with hash-chain length extension.
//!
//! Wraps a primitive that only produces a fixed 32-byte block and extends
//! it to arbitrary output lengths:
//!
//! - `n < 32`: hash once, truncate
//! - `n == 32`: hash once
//! - `n > 32`: chain `h(i) = H(h(i-1))` starting from `h(0) = H(message)`,
//!   concatenate blocks in order, truncate to `n`
//!
//! The multi-block expansion chains plain hash-of-previous-block with no
//! domain separation beyond position. That is adequate here (the value
//! being expanded is already assumed uniformly random) but it is NOT a
//! general-purpose XOF, and it must stay exactly as is: secrets derived
//! under this scheme have to keep reproducing bit-for-bit.

use blake2::Blake2b;
use sha2::{Digest, Sha256, digest::consts::U32};
use zeroize::Zeroize;

use super::BlockPrimitive;
use crate::{buffer::SecureBuffer, error::CryptoError};

type Blake2b256 = Blake2b<U32>;

/// Output size of both block primitives, in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Hash `message` to `output_length` bytes with the selected primitive.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedOutputLength`] when `output_length` is zero
pub fn hash(
    primitive: BlockPrimitive,
    message: &[u8],
    output_length: usize,
) -> Result<SecureBuffer, CryptoError> {
    if output_length == 0 {
        return Err(CryptoError::UnsupportedOutputLength {
            function: primitive.name(),
            requested: output_length,
            min: 1,
            max: usize::MAX,
        });
    }

    let out = match primitive {
        BlockPrimitive::Sha256 => expand::<Sha256>(message, output_length),
        BlockPrimitive::Blake2b256 => expand::<Blake2b256>(message, output_length),
    };
    Ok(out)
}

impl BlockPrimitive {
    /// Name used in error reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Blake2b256 => "BLAKE2b",
        }
    }
}

fn expand<D: Digest>(message: &[u8], output_length: usize) -> SecureBuffer {
    let mut out = SecureBuffer::zeroed(output_length);
    let mut block = D::digest(message);
    let mut written = 0;

    loop {
        let take = BLOCK_SIZE.min(output_length - written);
        out.as_mut_bytes()[written..written + take].copy_from_slice(&block[..take]);
        written += take;
        if written == output_length {
            break;
        }
        block = D::digest(&block);
    }

    block.as_mut_slice().zeroize();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_matches_primitive() {
        let direct: [u8; 32] = Sha256::digest(b"abc").into();
        let out = hash(BlockPrimitive::Sha256, b"abc", 32).unwrap();
        assert_eq!(out.as_bytes(), direct);
    }

    #[test]
    fn short_output_is_truncated_single_hash() {
        let full = hash(BlockPrimitive::Sha256, b"abc", 32).unwrap();
        let short = hash(BlockPrimitive::Sha256, b"abc", 10).unwrap();
        assert_eq!(short.as_bytes(), &full.as_bytes()[..10]);
    }

    #[test]
    fn long_output_chains_blocks() {
        let h1: [u8; 32] = Sha256::digest(b"abc").into();
        let h2: [u8; 32] = Sha256::digest(h1).into();

        let out = hash(BlockPrimitive::Sha256, b"abc", 48).unwrap();
        assert_eq!(&out.as_bytes()[..32], h1);
        assert_eq!(&out.as_bytes()[32..], &h2[..16]);
    }

    #[test]
    fn expansion_is_prefix_stable() {
        for n in [1usize, 31, 32, 33, 64, 65, 100] {
            let shorter = hash(BlockPrimitive::Blake2b256, b"prefix law", n).unwrap();
            let longer = hash(BlockPrimitive::Blake2b256, b"prefix law", n + 1).unwrap();
            assert_eq!(
                shorter.as_bytes(),
                &longer.as_bytes()[..n],
                "first {n} bytes must not depend on requested length"
            );
        }
    }

    #[test]
    fn zero_length_is_rejected() {
        let result = hash(BlockPrimitive::Sha256, b"abc", 0);
        assert!(matches!(result, Err(CryptoError::UnsupportedOutputLength { requested: 0, .. })));
    }

    #[test]
    fn primitives_produce_different_output() {
        let sha = hash(BlockPrimitive::Sha256, b"abc", 64).unwrap();
        let blake = hash(BlockPrimitive::Blake2b256, b"abc", 64).unwrap();
        assert_ne!(sha, blake);
    }
}
