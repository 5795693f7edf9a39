//! Derived Ed25519 key pairs for signing and verification.

use ed25519_dalek::{Signature, Signer, SigningKey as DalekSigningKey, Verifier, VerifyingKey};
use keyloom_crypto::{CryptoError, SecureBuffer};
use keyloom_proto::wire::{FieldReader, put_field};
use keyloom_recipe::{Purpose, Recipe};
use serde::{Deserialize, Serialize};

use crate::{derivation, error::KeyError};

/// Ed25519 seed and public-key length.
pub const KEY_LENGTH_IN_BYTES: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH_IN_BYTES: usize = 64;

/// The private half of a derived Ed25519 pair.
#[derive(Debug, PartialEq, Eq)]
pub struct SigningKey {
    seed_bytes: SecureBuffer,
    public_key_bytes: [u8; KEY_LENGTH_IN_BYTES],
    recipe: String,
}

/// The public half of a derived Ed25519 pair. Holds no secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureVerificationKey {
    public_key_bytes: [u8; KEY_LENGTH_IN_BYTES],
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct SigningKeyJson {
    #[serde(rename = "secretKeyBytes")]
    secret_key_bytes: String,
    #[serde(default)]
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct VerificationKeyJson {
    #[serde(rename = "publicKeyBytes")]
    public_key_bytes: String,
    #[serde(default)]
    recipe: String,
}

impl SigningKey {
    /// Derive a key pair from a seed string and recipe text.
    ///
    /// The recipe's `type` must be `SigningKey` or unset. The public half
    /// is deterministic given the seed.
    pub fn derive_from_seed(seed: &str, recipe_json: &str) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::SigningKey)?;
        let seed_bytes = derivation::derive_secret_bytes(seed, &recipe, Purpose::SigningKey)?;
        Self::from_secure_buffer(seed_bytes, recipe.into_json())
    }

    /// Reconstitute from the raw 32-byte seed and the recipe text that
    /// produced it.
    pub fn from_bytes(seed_bytes: Vec<u8>, recipe: String) -> Result<Self, KeyError> {
        if seed_bytes.len() != KEY_LENGTH_IN_BYTES {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_LENGTH_IN_BYTES,
                actual: seed_bytes.len(),
            });
        }
        Self::from_secure_buffer(SecureBuffer::from_vec(seed_bytes), recipe)
    }

    fn from_secure_buffer(seed: SecureBuffer, recipe: String) -> Result<Self, KeyError> {
        let dalek = Self::dalek_key(&seed)?;
        let public_key_bytes = dalek.verifying_key().to_bytes();
        Ok(Self { seed_bytes: seed, public_key_bytes, recipe })
    }

    fn dalek_key(seed: &SecureBuffer) -> Result<DalekSigningKey, KeyError> {
        let Ok(seed_array) = <&[u8; KEY_LENGTH_IN_BYTES]>::try_from(seed.as_bytes()) else {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_LENGTH_IN_BYTES,
                actual: seed.len(),
            });
        };
        Ok(DalekSigningKey::from_bytes(seed_array))
    }

    /// The raw seed. Read access only.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.seed_bytes.as_bytes()
    }

    /// The public half.
    pub fn public_key_bytes(&self) -> &[u8; KEY_LENGTH_IN_BYTES] {
        &self.public_key_bytes
    }

    /// Verbatim recipe text this pair was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// The matching verification key as a standalone object.
    pub fn signature_verification_key(&self) -> SignatureVerificationKey {
        SignatureVerificationKey {
            public_key_bytes: self.public_key_bytes,
            recipe: self.recipe.clone(),
        }
    }

    /// Sign a message. Ed25519 signing is deterministic: the same key and
    /// message always produce the same signature.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LENGTH_IN_BYTES], KeyError> {
        let dalek = Self::dalek_key(&self.seed_bytes)?;
        Ok(dalek.sign(message).to_bytes())
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    ///
    /// Only the seed travels; the public half is recomputed on
    /// reconstitution.
    pub fn to_json(&self) -> String {
        let json = SigningKeyJson {
            secret_key_bytes: hex::encode(self.seed_bytes.as_bytes()),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("signing key serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: SigningKeyJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        let bytes = hex::decode(&parsed.secret_key_bytes)
            .map_err(keyloom_proto::PackageError::InvalidHex)?;
        Self::from_bytes(bytes, parsed.recipe)
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "secretKeyBytes", self.seed_bytes.as_bytes())?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let seed_bytes = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Self::from_bytes(seed_bytes, recipe)
    }
}

impl SignatureVerificationKey {
    /// Reconstitute from raw public-key bytes and recipe text.
    pub fn from_bytes(public_key_bytes: Vec<u8>, recipe: String) -> Result<Self, KeyError> {
        let Ok(public_key_bytes) =
            <[u8; KEY_LENGTH_IN_BYTES]>::try_from(public_key_bytes.as_slice())
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

    /// Verify a signature over `message`.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Crypto`] with a verification kind when the signature
    ///   does not verify or the public key bytes are not a valid point
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8; SIGNATURE_LENGTH_IN_BYTES],
    ) -> Result<(), KeyError> {
        let verifying_key = VerifyingKey::from_bytes(&self.public_key_bytes).map_err(|_| {
            KeyError::Crypto(CryptoError::Verification { reason: "invalid public key" })
        })?;
        let signature = Signature::from_bytes(signature);
        verifying_key.verify(message, &signature).map_err(|_| {
            KeyError::Crypto(CryptoError::Verification { reason: "signature verification failed" })
        })
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    pub fn to_json(&self) -> String {
        let json = VerificationKeyJson {
            public_key_bytes: hex::encode(self.public_key_bytes),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("verification key serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: VerificationKeyJson =
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
