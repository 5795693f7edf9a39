//! Derived X25519 key pairs and public-key sealing.

use keyloom_crypto::{SecureBuffer, seal::public_key};
use keyloom_proto::{
    PackagedSealedMessage,
    wire::{FieldReader, put_field},
};
use keyloom_recipe::{Purpose, Recipe};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{derivation, error::KeyError};

/// X25519 key length, both halves.
pub const KEY_LENGTH_IN_BYTES: usize = public_key::KEY_SIZE;

/// The private half of a derived X25519 pair; unseals messages sealed to
/// its [`SealingKey`].
#[derive(Debug, PartialEq, Eq)]
pub struct UnsealingKey {
    secret_key_bytes: SecureBuffer,
    public_key_bytes: [u8; KEY_LENGTH_IN_BYTES],
    recipe: String,
}

/// The public half of a derived X25519 pair. Holds no secret: safe to
/// hand out, serialize and publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealingKey {
    public_key_bytes: [u8; KEY_LENGTH_IN_BYTES],
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct UnsealingKeyJson {
    #[serde(rename = "secretKeyBytes")]
    secret_key_bytes: String,
    #[serde(default)]
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct SealingKeyJson {
    #[serde(rename = "publicKeyBytes")]
    public_key_bytes: String,
    #[serde(default)]
    recipe: String,
}

impl UnsealingKey {
    /// Derive a key pair from a seed string and recipe text.
    ///
    /// The recipe's `type` must be `UnsealingKey` or unset. The public
    /// half is deterministic given the seed.
    pub fn derive_from_seed(seed: &str, recipe_json: &str) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::UnsealingKey)?;
        let secret = derivation::derive_secret_bytes(seed, &recipe, Purpose::UnsealingKey)?;
        Self::from_secure_buffer(secret, recipe.into_json())
    }

    /// Reconstitute from the raw secret scalar and the recipe text that
    /// produced it.
    pub fn from_bytes(secret_key_bytes: Vec<u8>, recipe: String) -> Result<Self, KeyError> {
        if secret_key_bytes.len() != KEY_LENGTH_IN_BYTES {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_LENGTH_IN_BYTES,
                actual: secret_key_bytes.len(),
            });
        }
        Self::from_secure_buffer(SecureBuffer::from_vec(secret_key_bytes), recipe)
    }

    fn from_secure_buffer(secret: SecureBuffer, recipe: String) -> Result<Self, KeyError> {
        let public_key_bytes = public_key::public_key_for_secret(secret_array(&secret)?);
        Ok(Self { secret_key_bytes: secret, public_key_bytes, recipe })
    }

    /// The secret scalar. Read access only.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key_bytes.as_bytes()
    }

    /// The public half.
    pub fn public_key_bytes(&self) -> &[u8; KEY_LENGTH_IN_BYTES] {
        &self.public_key_bytes
    }

    /// Verbatim recipe text this pair was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// The matching public key as a standalone object.
    pub fn sealing_key(&self) -> SealingKey {
        SealingKey { public_key_bytes: self.public_key_bytes, recipe: self.recipe.clone() }
    }

    /// Unseal a packaged message addressed to this key pair.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Crypto`] with a verification kind for every failure
    ///   mode
    pub fn unseal(&self, package: &PackagedSealedMessage) -> Result<Vec<u8>, KeyError> {
        self.unseal_ciphertext(package.ciphertext(), package.unsealing_instructions())
    }

    /// Unseal raw ciphertext against caller-supplied instruction text.
    pub fn unseal_ciphertext(
        &self,
        ciphertext: &[u8],
        unsealing_instructions: &str,
    ) -> Result<Vec<u8>, KeyError> {
        Ok(public_key::unseal(
            ciphertext,
            secret_array(&self.secret_key_bytes)?,
            unsealing_instructions,
        )?)
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    ///
    /// Only the secret scalar travels; the public half is recomputed on
    /// reconstitution.
    pub fn to_json(&self) -> String {
        let json = UnsealingKeyJson {
            secret_key_bytes: hex::encode(self.secret_key_bytes.as_bytes()),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("unsealing key serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: UnsealingKeyJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        let bytes = hex::decode(&parsed.secret_key_bytes)
            .map_err(keyloom_proto::PackageError::InvalidHex)?;
        Self::from_bytes(bytes, parsed.recipe)
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "secretKeyBytes", self.secret_key_bytes.as_bytes())?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let secret_key_bytes = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Self::from_bytes(secret_key_bytes, recipe)
    }
}

impl SealingKey {
    /// Reconstitute from raw public-key bytes and recipe text.
    pub fn from_bytes(
        public_key_bytes: Vec<u8>,
        recipe: String,
    ) -> Result<Self, KeyError> {
        let Ok(public_key_bytes) = <[u8; KEY_LENGTH_IN_BYTES]>::try_from(public_key_bytes.as_slice())
        else {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_LENGTH_IN_BYTES,
                actual: public_key_bytes.len(),
            });
        };
        Ok(Self { public_key_bytes, recipe })
    }

    /// The public-key bytes.
    pub fn public_key_bytes(&self) -> &[u8; KEY_LENGTH_IN_BYTES] {
        &self.public_key_bytes
    }

    /// Verbatim recipe text the pair was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Seal a message with no unsealing instructions.
    pub fn seal(&self, message: &[u8]) -> Result<PackagedSealedMessage, KeyError> {
        self.seal_with_instructions(message, "")
    }

    /// Seal a message, binding `unsealing_instructions` into the nonce.
    ///
    /// Consumes fresh randomness for the per-message ephemeral key pair;
    /// everything else is deterministic.
    pub fn seal_with_instructions(
        &self,
        message: &[u8],
        unsealing_instructions: &str,
    ) -> Result<PackagedSealedMessage, KeyError> {
        let mut ephemeral_secret = [0u8; KEY_LENGTH_IN_BYTES];
        OsRng.fill_bytes(&mut ephemeral_secret);
        let ciphertext =
            public_key::seal(message, &self.public_key_bytes, unsealing_instructions, ephemeral_secret);
        ephemeral_secret.zeroize();

        Ok(PackagedSealedMessage::new(
            ciphertext,
            self.recipe.clone(),
            unsealing_instructions.to_owned(),
        ))
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    pub fn to_json(&self) -> String {
        let json = SealingKeyJson {
            public_key_bytes: hex::encode(self.public_key_bytes),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("sealing key serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: SealingKeyJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        let bytes = hex::decode(&parsed.public_key_bytes)
            .map_err(keyloom_proto::PackageError::InvalidHex)?;
        Self::from_bytes(bytes, parsed.recipe)
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "publicKeyBytes", &self.public_key_bytes)?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let public_key_bytes = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Self::from_bytes(public_key_bytes, recipe)
    }
}

fn secret_array(buffer: &SecureBuffer) -> Result<&[u8; KEY_LENGTH_IN_BYTES], KeyError> {
    buffer.as_bytes().try_into().map_err(|_| KeyError::InvalidKeyLength {
        expected: KEY_LENGTH_IN_BYTES,
        actual: buffer.len(),
    })
}
