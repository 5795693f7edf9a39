//! Length-prefixed byte-string primitives.
//!
//! Every field in the binary container is `[length: u32 BE][bytes]`.
//! The same primitives serialize derived-key objects one layer up, so
//! the framing lives here rather than inside any one type.

use bytes::BufMut;

use crate::error::PackageError;

/// Size of each field's length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Append one length-prefixed field.
///
/// # Errors
///
/// - [`PackageError::FieldTooLarge`] when `bytes` exceeds the u32 prefix
pub fn put_field(
    dst: &mut Vec<u8>,
    field: &'static str,
    bytes: &[u8],
) -> Result<(), PackageError> {
    let Ok(length) = u32::try_from(bytes.len()) else {
        return Err(PackageError::FieldTooLarge { field, size: bytes.len() });
    };
    dst.put_u32(length);
    dst.put_slice(bytes);
    Ok(())
}

/// Sequential reader over length-prefixed fields.
///
/// Validation is fail-fast: a prefix promising more bytes than remain is
/// rejected before anything is copied, and [`FieldReader::finish`]
/// rejects trailing bytes so two distinct encodings can never decode to
/// the same value.
pub struct FieldReader<'a> {
    remaining: &'a [u8],
}

impl<'a> FieldReader<'a> {
    /// Start reading from the beginning of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { remaining: input }
    }

    /// Read the next field's bytes.
    pub fn read(&mut self) -> Result<&'a [u8], PackageError> {
        if self.remaining.len() < LENGTH_PREFIX_SIZE {
            return Err(PackageError::Truncated {
                needed: LENGTH_PREFIX_SIZE - self.remaining.len(),
            });
        }
        let (prefix, rest) = self.remaining.split_at(LENGTH_PREFIX_SIZE);
        let Ok(prefix_array) = <[u8; LENGTH_PREFIX_SIZE]>::try_from(prefix) else {
            unreachable!("split_at produces exactly LENGTH_PREFIX_SIZE bytes");
        };
        let length = u32::from_be_bytes(prefix_array) as usize;

        if rest.len() < length {
            return Err(PackageError::Truncated { needed: length - rest.len() });
        }
        let (bytes, remaining) = rest.split_at(length);
        self.remaining = remaining;
        Ok(bytes)
    }

    /// Read the next field as UTF-8 text.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, PackageError> {
        let bytes = self.read()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| PackageError::InvalidUtf8 { field })
    }

    /// Assert that every byte has been consumed.
    pub fn finish(self) -> Result<(), PackageError> {
        if self.remaining.is_empty() {
            Ok(())
        } else {
            Err(PackageError::TrailingBytes { count: self.remaining.len() })
        }
    }
}
