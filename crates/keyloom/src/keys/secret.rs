//! Raw derived secrets of caller-chosen length.

use keyloom_crypto::SecureBuffer;
use keyloom_proto::wire::{FieldReader, put_field};
use keyloom_recipe::{Purpose, Recipe};
use serde::{Deserialize, Serialize};

use crate::{derivation, error::KeyError};

/// Arbitrary-length secret bytes derived from a seed and recipe.
///
/// The plainest derived object: no algorithm, no public half, just the
/// raw output of the derivation pipeline and the recipe that produced it.
#[derive(Debug, PartialEq, Eq)]
pub struct Secret {
    secret_bytes: SecureBuffer,
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct SecretJson {
    #[serde(rename = "secretBytes")]
    secret_bytes: String,
    #[serde(default)]
    recipe: String,
}

impl Secret {
    /// Derive from a seed string and recipe text.
    ///
    /// The recipe's `type` must be `Secret` or unset.
    pub fn derive_from_seed(seed: &str, recipe_json: &str) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::Secret)?;
        let secret_bytes = derivation::derive_secret_bytes(seed, &recipe, Purpose::Secret)?;
        Ok(Self { secret_bytes, recipe: recipe.into_json() })
    }

    /// Reconstitute from raw bytes and the recipe text that produced
    /// them.
    pub fn from_bytes(secret_bytes: Vec<u8>, recipe: String) -> Self {
        Self { secret_bytes: SecureBuffer::from_vec(secret_bytes), recipe }
    }

    /// The derived bytes. Read access only.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret_bytes.as_bytes()
    }

    /// Verbatim recipe text this secret was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Serialize to the JSON form with hex-encoded bytes.
    pub fn to_json(&self) -> String {
        let json = SecretJson {
            secret_bytes: hex::encode(self.secret_bytes.as_bytes()),
            recipe: self.recipe.clone(),
        };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("secret serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: SecretJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        let bytes = hex::decode(&parsed.secret_bytes)
            .map_err(keyloom_proto::PackageError::InvalidHex)?;
        Ok(Self::from_bytes(bytes, parsed.recipe))
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "secretBytes", self.secret_bytes.as_bytes())?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let secret_bytes = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Ok(Self::from_bytes(secret_bytes, recipe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avocado_recipe_yields_64_byte_secret() {
        let secret = Secret::derive_from_seed("Avocado", r#"{"lengthInBytes": 64}"#).unwrap();
        assert_eq!(secret.secret_bytes().len(), 64);
        assert_eq!(secret.recipe(), r#"{"lengthInBytes": 64}"#);
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Secret::derive_from_seed("seed", r#"{"lengthInBytes": 40}"#).unwrap();
        let b = Secret::derive_from_seed("seed", r#"{"lengthInBytes": 40}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mistyped_recipe_is_rejected() {
        let result = Secret::derive_from_seed("seed", r#"{"type": "Password"}"#);
        assert!(matches!(result, Err(KeyError::Recipe(_))));
    }

    #[test]
    fn json_round_trip() {
        let secret = Secret::derive_from_seed("seed", r#"{"lengthInBytes": 16}"#).unwrap();
        let restored = Secret::from_json(&secret.to_json()).unwrap();
        assert_eq!(restored, secret);
    }

    #[test]
    fn binary_round_trip() {
        let secret = Secret::derive_from_seed("seed", "").unwrap();
        let restored =
            Secret::from_serialized_binary_form(&secret.to_serialized_binary_form().unwrap())
                .unwrap();
        assert_eq!(restored, secret);
    }

    #[test]
    fn json_form_is_hex_encoded() {
        let secret = Secret::from_bytes(vec![0xDE, 0xAD], "{}".to_owned());
        assert_eq!(secret.to_json(), r#"{"secretBytes":"dead","recipe":"{}"}"#);
    }
}
