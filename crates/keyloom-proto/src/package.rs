//! The packaged sealed message: ciphertext plus unsealing metadata.

use serde::{Deserialize, Serialize};

use crate::{
    error::PackageError,
    wire::{FieldReader, LENGTH_PREFIX_SIZE, put_field},
};

/// A sealed message together with everything needed to unseal it again:
/// the recipe text that re-derives the key and the instruction text bound
/// into the nonce.
///
/// Immutable. Safe to persist or transmit as-is: the recipe and
/// instructions are plaintext metadata, not secrets, and the ciphertext
/// is authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedSealedMessage {
    ciphertext: Vec<u8>,
    recipe: String,
    unsealing_instructions: String,
}

/// JSON container form. The two text fields are omitted when empty.
#[derive(Serialize, Deserialize)]
struct PackageJson {
    ciphertext: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    recipe: String,
    #[serde(
        default,
        rename = "unsealingInstructions",
        skip_serializing_if = "String::is_empty"
    )]
    unsealing_instructions: String,
}

impl PackagedSealedMessage {
    /// Package a ciphertext with its unsealing metadata.
    pub fn new(ciphertext: Vec<u8>, recipe: String, unsealing_instructions: String) -> Self {
        Self { ciphertext, recipe, unsealing_instructions }
    }

    /// The sealed bytes, including whatever framing the sealing protocol
    /// embedded (ephemeral public key or nonce, and tag).
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Verbatim recipe text the sealing key was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Verbatim instruction text bound into the seal; empty when none.
    pub fn unsealing_instructions(&self) -> &str {
        &self.unsealing_instructions
    }

    /// Encode as the fixed binary container: three length-prefixed byte
    /// strings in order (ciphertext, recipe, instructions).
    ///
    /// # Errors
    ///
    /// - [`PackageError::FieldTooLarge`] when a field exceeds the u32
    ///   length prefix
    pub fn to_binary(&self) -> Result<Vec<u8>, PackageError> {
        let mut out = Vec::with_capacity(
            3 * LENGTH_PREFIX_SIZE
                + self.ciphertext.len()
                + self.recipe.len()
                + self.unsealing_instructions.len(),
        );
        put_field(&mut out, "ciphertext", &self.ciphertext)?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        put_field(&mut out, "unsealingInstructions", self.unsealing_instructions.as_bytes())?;
        Ok(out)
    }

    /// Decode the fixed binary container.
    ///
    /// # Errors
    ///
    /// - [`PackageError::Truncated`] when the input ends early
    /// - [`PackageError::TrailingBytes`] when the input continues past
    ///   the third field
    /// - [`PackageError::InvalidUtf8`] when a text field is not UTF-8
    pub fn from_binary(input: &[u8]) -> Result<Self, PackageError> {
        let mut reader = FieldReader::new(input);
        let ciphertext = reader.read()?.to_vec();
        let recipe = reader.read_string("recipe")?;
        let unsealing_instructions = reader.read_string("unsealingInstructions")?;
        reader.finish()?;
        Ok(Self { ciphertext, recipe, unsealing_instructions })
    }

    /// Encode as the JSON container form with hex-encoded ciphertext.
    pub fn to_json(&self) -> String {
        let package = PackageJson {
            ciphertext: hex::encode(&self.ciphertext),
            recipe: self.recipe.clone(),
            unsealing_instructions: self.unsealing_instructions.clone(),
        };
        let Ok(json) = serde_json::to_string(&package) else {
            unreachable!("package serialization cannot fail");
        };
        json
    }

    /// Decode the JSON container form.
    ///
    /// # Errors
    ///
    /// - [`PackageError::Json`] when the document is malformed
    /// - [`PackageError::InvalidHex`] when the ciphertext field is not hex
    pub fn from_json(json: &str) -> Result<Self, PackageError> {
        let package: PackageJson = serde_json::from_str(json)?;
        Ok(Self {
            ciphertext: hex::decode(&package.ciphertext)?,
            recipe: package.recipe,
            unsealing_instructions: package.unsealing_instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackagedSealedMessage {
        PackagedSealedMessage::new(
            vec![0xDE, 0xAD, 0xBE, 0xEF],
            r#"{"type":"SymmetricKey"}"#.to_owned(),
            "acknowledge before use".to_owned(),
        )
    }

    #[test]
    fn binary_round_trip() {
        let package = sample();
        let encoded = package.to_binary().unwrap();
        let decoded = PackagedSealedMessage::from_binary(&encoded).unwrap();
        assert_eq!(decoded, package);
    }

    #[test]
    fn binary_layout_is_length_prefixed() {
        let package = PackagedSealedMessage::new(vec![1, 2], "r".to_owned(), String::new());
        let encoded = package.to_binary().unwrap();
        assert_eq!(
            encoded,
            [
                0, 0, 0, 2, 1, 2, // ciphertext
                0, 0, 0, 1, b'r', // recipe
                0, 0, 0, 0, // empty instructions
            ]
        );
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let encoded = sample().to_binary().unwrap();
        for cut in 0..encoded.len() {
            let result = PackagedSealedMessage::from_binary(&encoded[..cut]);
            assert!(
                matches!(result, Err(PackageError::Truncated { .. })),
                "prefix of {cut} bytes should be rejected"
            );
        }
    }

    #[test]
    fn trailing_binary_bytes_are_rejected() {
        let mut encoded = sample().to_binary().unwrap();
        encoded.push(0x00);
        let result = PackagedSealedMessage::from_binary(&encoded);
        assert!(matches!(result, Err(PackageError::TrailingBytes { count: 1 })));
    }

    #[test]
    fn json_round_trip() {
        let package = sample();
        let decoded = PackagedSealedMessage::from_json(&package.to_json()).unwrap();
        assert_eq!(decoded, package);
    }

    #[test]
    fn json_omits_empty_fields() {
        let package = PackagedSealedMessage::new(vec![0xAB], String::new(), String::new());
        assert_eq!(package.to_json(), r#"{"ciphertext":"ab"}"#);

        let decoded = PackagedSealedMessage::from_json(r#"{"ciphertext":"ab"}"#).unwrap();
        assert_eq!(decoded, package);
    }

    #[test]
    fn json_includes_instructions_when_present() {
        let json = sample().to_json();
        assert!(json.contains(r#""unsealingInstructions":"acknowledge before use""#));
        assert!(json.contains(r#""ciphertext":"deadbeef""#));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        let result = PackagedSealedMessage::from_json(r#"{"ciphertext":"zz"}"#);
        assert!(matches!(result, Err(PackageError::InvalidHex(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = PackagedSealedMessage::from_json("{");
        assert!(matches!(result, Err(PackageError::Json(_))));
    }
}
