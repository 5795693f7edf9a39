//! Derived symmetric keys and symmetric sealing.

use keyloom_crypto::{SecureBuffer, seal::symmetric};
use keyloom_proto::{
    PackagedSealedMessage,
    wire::{FieldReader, put_field},
};
use keyloom_recipe::{Purpose, Recipe};
use serde::{Deserialize, Serialize};

use crate::{derivation, error::KeyError};

/// XSalsa20-Poly1305 key derived from a seed and recipe.
///
/// Seals and unseals messages with the symmetric protocol: the nonce is
/// derived from the key, the instruction text and the message, and
/// re-derived from the recovered plaintext at unseal time.
#[derive(Debug, PartialEq, Eq)]
pub struct SymmetricKey {
    key_bytes: SecureBuffer,
    recipe: String,
}

/// Key length fixed by XSalsa20-Poly1305.
pub const KEY_LENGTH_IN_BYTES: usize = symmetric::KEY_SIZE;

#[derive(Serialize, Deserialize)]
struct SymmetricKeyJson {
    #[serde(rename = "keyBytes")]
    key_bytes: String,
    #[serde(default)]
    recipe: String,
}

impl SymmetricKey {
    /// Derive from a seed string and recipe text.
    ///
    /// The recipe's `type` must be `SymmetricKey` or unset.
    pub fn derive_from_seed(seed: &str, recipe_json: &str) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::SymmetricKey)?;
        let key_bytes = derivation::derive_secret_bytes(seed, &recipe, Purpose::SymmetricKey)?;
        Ok(Self { key_bytes, recipe: recipe.into_json() })
    }

    /// Reconstitute from raw key bytes and the recipe text that produced
    /// them.
    pub fn from_bytes(key_bytes: Vec<u8>, recipe: String) -> Result<Self, KeyError> {
        if key_bytes.len() != KEY_LENGTH_IN_BYTES {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_LENGTH_IN_BYTES,
                actual: key_bytes.len(),
            });
        }
        Ok(Self { key_bytes: SecureBuffer::from_vec(key_bytes), recipe })
    }

    /// The raw key. Read access only.
    pub fn key_bytes(&self) -> &[u8] {
        self.key_bytes.as_bytes()
    }

    /// Verbatim recipe text this key was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Seal a message with no unsealing instructions.
    pub fn seal(&self, message: &[u8]) -> Result<PackagedSealedMessage, KeyError> {
        self.seal_with_instructions(message, "")
    }

    /// Seal a message, binding `unsealing_instructions` into the nonce.
    ///
    /// The returned package carries this key's recipe text and the
    /// instruction text, so any holder of the seed can unseal it.
    pub fn seal_with_instructions(
        &self,
        message: &[u8],
        unsealing_instructions: &str,
    ) -> Result<PackagedSealedMessage, KeyError> {
        let ciphertext = symmetric::seal(message, self.key_array(), unsealing_instructions);
        Ok(PackagedSealedMessage::new(
            ciphertext,
            self.recipe.clone(),
            unsealing_instructions.to_owned(),
        ))
    }

    /// Unseal a packaged message with this key.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Crypto`] with a verification kind for every failure
    ///   mode: wrong key, altered instructions, corrupted ciphertext
    pub fn unseal(&self, package: &PackagedSealedMessage) -> Result<Vec<u8>, KeyError> {
        self.unseal_ciphertext(package.ciphertext(), package.unsealing_instructions())
    }

    /// Unseal raw ciphertext against caller-supplied instruction text.
    pub fn unseal_ciphertext(
        &self,
        ciphertext: &[u8],
        unsealing_instructions: &str,
    ) -> Result<Vec<u8>, KeyError> {
        Ok(symmetric::unseal(ciphertext, self.key_array(), unsealing_instructions)?)
    }

    fn key_array(&self) -> &[u8; KEY_LENGTH_IN_BYTES] {
        let Ok(array) = self.key_bytes.as_bytes().try_into() else {
            unreachable!("key length enforced at construction");
        };
        array
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    pub fn to_json(&self) -> String {
        let json = SymmetricKeyJson {
            key_bytes: hex::encode(self.key_bytes.as_bytes()),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("symmetric key serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: SymmetricKeyJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        let bytes =
            hex::decode(&parsed.key_bytes).map_err(keyloom_proto::PackageError::InvalidHex)?;
        Self::from_bytes(bytes, parsed.recipe)
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "keyBytes", self.key_bytes.as_bytes())?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let key_bytes = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Self::from_bytes(key_bytes, recipe)
    }
}
