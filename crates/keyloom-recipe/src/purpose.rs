//! Derivation purposes and their preimage tags.

use std::fmt;

/// What kind of secret a recipe derives.
///
/// The purpose selects defaults during validation and contributes its tag
/// to the derivation preimage, so the same seed and recipe text derive
/// unrelated secrets for different purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Raw secret bytes of arbitrary length.
    Secret,
    /// XSalsa20-Poly1305 symmetric key.
    SymmetricKey,
    /// X25519 key pair for public-key sealing.
    UnsealingKey,
    /// Ed25519 key pair for signatures.
    SigningKey,
    /// Human-readable dictionary-word password.
    Password,
}

impl Purpose {
    /// The literal string embedded in the derivation preimage.
    ///
    /// These values are part of the derivation format; changing one would
    /// change every secret derived for that purpose.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Secret => "Secret",
            Self::SymmetricKey => "SymmetricKey",
            Self::UnsealingKey => "UnsealingKey",
            Self::SigningKey => "SigningKey",
            Self::Password => "Password",
        }
    }

    /// Parse the JSON `type` field value.
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "Secret" => Some(Self::Secret),
            "SymmetricKey" => Some(Self::SymmetricKey),
            "UnsealingKey" => Some(Self::UnsealingKey),
            "SigningKey" => Some(Self::SigningKey),
            "Password" => Some(Self::Password),
            _ => None,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
