//! Hash-function identifiers and cost-parameter defaults.

use std::fmt;

/// Hash backend named by a recipe's `hashFunction` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunctionId {
    /// Fast fixed-block hash (default).
    Sha256,
    /// Fast fixed-block hash; derivation uses the expand-only HKDF path.
    Blake2b,
    /// Memory-hard, Argon2 family.
    Argon2id,
    /// Memory-hard, scrypt family.
    Scrypt,
}

/// Pass count applied when a memory-hard backend is selected and the
/// recipe does not say otherwise.
pub const DEFAULT_MEMORY_PASSES: u32 = 2;

/// Memory budget applied when a memory-hard backend is selected and the
/// recipe does not say otherwise: 64 MiB.
pub const DEFAULT_MEMORY_LIMIT_IN_BYTES: u64 = 64 * 1024 * 1024;

/// Smallest memory budget either memory-hard primitive accepts: 8 KiB.
pub const MIN_MEMORY_LIMIT_IN_BYTES: u64 = 8 * 1024;

impl HashFunctionId {
    /// True for the backends whose cost is parameterized by passes and
    /// memory.
    pub fn is_memory_hard(self) -> bool {
        matches!(self, Self::Argon2id | Self::Scrypt)
    }

    /// Parse the JSON `hashFunction` field value.
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "SHA256" => Some(Self::Sha256),
            "BLAKE2b" => Some(Self::Blake2b),
            "Argon2id" => Some(Self::Argon2id),
            "Scrypt" => Some(Self::Scrypt),
            _ => None,
        }
    }

    /// Canonical field value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Blake2b => "BLAKE2b",
            Self::Argon2id => "Argon2id",
            Self::Scrypt => "Scrypt",
        }
    }
}

impl fmt::Display for HashFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
