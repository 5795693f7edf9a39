//! Key algorithms and their fixed key lengths.

use std::fmt;

use crate::purpose::Purpose;

/// Algorithm a derived key is intended for.
///
/// Each keyed purpose admits exactly one algorithm, and each algorithm
/// fixes its seed/key length, so a recipe naming a mismatched pair is
/// rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Symmetric authenticated encryption.
    XSalsa20Poly1305,
    /// Public-key sealing curve.
    X25519,
    /// Signature scheme.
    Ed25519,
}

impl Algorithm {
    /// Exact key or seed length required by this algorithm, in bytes.
    pub fn key_length_in_bytes(self) -> usize {
        match self {
            Self::XSalsa20Poly1305 | Self::X25519 | Self::Ed25519 => 32,
        }
    }

    /// The single algorithm legal for a purpose, if the purpose is keyed.
    pub fn default_for_purpose(purpose: Purpose) -> Option<Self> {
        match purpose {
            Purpose::SymmetricKey => Some(Self::XSalsa20Poly1305),
            Purpose::UnsealingKey => Some(Self::X25519),
            Purpose::SigningKey => Some(Self::Ed25519),
            Purpose::Secret | Purpose::Password => None,
        }
    }

    /// Parse the JSON `algorithm` field value.
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "XSalsa20Poly1305" => Some(Self::XSalsa20Poly1305),
            "X25519" => Some(Self::X25519),
            "Ed25519" => Some(Self::Ed25519),
            _ => None,
        }
    }

    /// Canonical field value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XSalsa20Poly1305 => "XSalsa20Poly1305",
            Self::X25519 => "X25519",
            Self::Ed25519 => "Ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
