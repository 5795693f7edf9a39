//! Wipe-on-drop buffer for secret bytes.
//!
//! Every component in this workspace that produces or consumes secret
//! material does so through [`SecureBuffer`]. The buffer is move-only:
//! there is no `Clone`, and the only way to get the bytes out of the
//! wiped lifecycle is the explicit [`SecureBuffer::into_vec`] escape
//! hatch at serialization boundaries.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// An owned, fixed-length byte buffer that is zeroized on drop.
///
/// # Invariants
///
/// - Length is immutable after construction.
/// - The backing memory is wiped exactly once, when the buffer is dropped.
/// - Equality is byte-wise and constant-time for equal-length buffers.
pub struct SecureBuffer {
    bytes: Box<[u8]>,
}

impl SecureBuffer {
    /// Create a zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self { bytes: vec![0u8; len].into_boxed_slice() }
    }

    /// Take ownership of existing bytes.
    ///
    /// The vector's memory becomes part of the wiped lifecycle; callers
    /// must not retain copies of it.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes: bytes.into_boxed_slice() }
    }

    /// Number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the buffer holds zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read-only view of the bytes.
    ///
    /// The borrow grants temporary read access only; no component may
    /// retain the slice beyond the call that received it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view for backends that fill the buffer in place.
    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Move the bytes out of the wiped lifecycle.
    ///
    /// This is the serialization boundary: the returned vector is ordinary
    /// heap memory and will NOT be wiped. Callers take over that
    /// responsibility.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes).into_vec()
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl PartialEq for SecureBuffer {
    fn eq(&self, other: &Self) -> bool {
        // ct_eq short-circuits on length mismatch; the length itself is
        // not secret
        bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for SecureBuffer {}

/// Never prints contents, only the length.
impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBuffer({} bytes)", self.bytes.len())
    }
}
