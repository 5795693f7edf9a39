//! Recipe parsing, validation and the canonical explicit form.
//!
//! Validation is a single fail-fast pass: parse, resolve purpose against
//! the caller's requirement, resolve the algorithm and its fixed length,
//! reconcile password lengths, then resolve the hash function and its
//! cost parameters. The first violation aborts the pass, so an invalid
//! recipe never reaches the hash or sealing layers.

use serde::{Deserialize, Serialize};

use crate::{
    algorithm::Algorithm,
    error::RecipeError,
    hash_function::{
        DEFAULT_MEMORY_LIMIT_IN_BYTES, DEFAULT_MEMORY_PASSES, HashFunctionId,
        MIN_MEMORY_LIMIT_IN_BYTES,
    },
    purpose::Purpose,
    word_list::{WordList, WordListId},
};

/// Password strength applied when a recipe gives neither bits nor words.
const DEFAULT_PASSWORD_BITS: u32 = 128;

/// Bytes of derived material consumed per password word: one 64-bit word
/// of random material per output word.
pub const BYTES_PER_WORD: usize = 8;

/// The raw field set of the recipe JSON schema.
///
/// Unknown fields are deliberately tolerated: recipes may carry extra
/// context (sequence numbers, comments) that participates in derivation
/// only through the verbatim text.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    #[serde(rename = "type")]
    purpose: Option<String>,
    algorithm: Option<String>,
    length_in_bytes: Option<u64>,
    length_in_bits: Option<u32>,
    length_in_words: Option<u32>,
    length_in_chars: Option<u32>,
    word_list: Option<String>,
    hash_function: Option<String>,
    hash_function_memory_passes: Option<u32>,
    hash_function_memory_limit_in_bytes: Option<u64>,
}

/// A validated recipe.
///
/// Immutable once parsed. Keeps the original JSON text verbatim; that
/// text is what derivation binds, and [`Recipe::to_explicit_json`] is for
/// display only, never a substitute for the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    json: String,
    purpose: Option<Purpose>,
    algorithm: Option<Algorithm>,
    length_in_bytes: usize,
    length_in_bits: Option<u32>,
    length_in_words: Option<u32>,
    length_in_chars: Option<u32>,
    word_list: Option<WordListId>,
    hash_function: HashFunctionId,
    hash_function_memory_passes: u32,
    hash_function_memory_limit_in_bytes: Option<u64>,
}

impl Recipe {
    /// Parse a recipe with no purpose requirement.
    pub fn parse(json: &str) -> Result<Self, RecipeError> {
        Self::parse_with_required_purpose(json, None)
    }

    /// Parse a recipe that must be usable for `required`.
    ///
    /// A recipe naming a different `type` is rejected; a recipe leaving
    /// `type` unset resolves to `required`.
    pub fn parse_for(json: &str, required: Purpose) -> Result<Self, RecipeError> {
        Self::parse_with_required_purpose(json, Some(required))
    }

    fn parse_with_required_purpose(
        json: &str,
        required: Option<Purpose>,
    ) -> Result<Self, RecipeError> {
        // An empty recipe string means "all defaults". The empty string is
        // still what derivation binds, so it is stored as-is below.
        let document = if json.is_empty() { "{}" } else { json };
        let raw: RawRecipe = serde_json::from_str(document)?;

        let written_purpose = match raw.purpose.as_deref() {
            Some(value) => Some(Purpose::from_field(value).ok_or_else(|| {
                RecipeError::invalid("type", format!("unrecognized purpose `{value}`"))
            })?),
            None => None,
        };
        if let (Some(required), Some(written)) = (required, written_purpose)
            && written != required
        {
            return Err(RecipeError::invalid(
                "type",
                format!("recipe is for {written}, but {required} was required"),
            ));
        }
        let purpose = written_purpose.or(required);

        let algorithm = Self::resolve_algorithm(&raw, purpose)?;

        let (length_in_bytes, length_in_bits, length_in_words, length_in_chars, word_list) =
            if purpose == Some(Purpose::Password) {
                Self::resolve_password_length(&raw)?
            } else {
                Self::resolve_key_length(&raw, algorithm)?
            };

        let hash_function = match raw.hash_function.as_deref() {
            Some(value) => HashFunctionId::from_field(value).ok_or_else(|| {
                RecipeError::invalid("hashFunction", format!("unrecognized hash function `{value}`"))
            })?,
            None => HashFunctionId::Sha256,
        };

        let (hash_function_memory_passes, hash_function_memory_limit_in_bytes) =
            Self::resolve_hash_costs(&raw, hash_function)?;

        Ok(Self {
            json: json.to_owned(),
            purpose,
            algorithm,
            length_in_bytes,
            length_in_bits,
            length_in_words,
            length_in_chars,
            word_list,
            hash_function,
            hash_function_memory_passes,
            hash_function_memory_limit_in_bytes,
        })
    }

    fn resolve_algorithm(
        raw: &RawRecipe,
        purpose: Option<Purpose>,
    ) -> Result<Option<Algorithm>, RecipeError> {
        let named = match raw.algorithm.as_deref() {
            Some(value) => Some(Algorithm::from_field(value).ok_or_else(|| {
                RecipeError::invalid("algorithm", format!("unrecognized algorithm `{value}`"))
            })?),
            None => None,
        };
        let default = purpose.and_then(Algorithm::default_for_purpose);

        match (named, default, purpose) {
            (Some(named), Some(default), _) if named != default => Err(RecipeError::invalid(
                "algorithm",
                format!("{} recipes require {default}, got {named}", display_purpose(purpose)),
            )),
            (Some(named), None, Some(purpose)) => Err(RecipeError::invalid(
                "algorithm",
                format!("`{named}` is not valid for {purpose} recipes"),
            )),
            (named, default, _) => Ok(named.or(default)),
        }
    }

    fn resolve_key_length(
        raw: &RawRecipe,
        algorithm: Option<Algorithm>,
    ) -> Result<ResolvedLengths, RecipeError> {
        for (field, present) in [
            ("lengthInBits", raw.length_in_bits.is_some()),
            ("lengthInWords", raw.length_in_words.is_some()),
            ("lengthInChars", raw.length_in_chars.is_some()),
            ("wordList", raw.word_list.is_some()),
        ] {
            if present {
                return Err(RecipeError::invalid(field, "only valid for Password recipes"));
            }
        }

        let length_in_bytes = match (raw.length_in_bytes, algorithm) {
            (Some(requested), Some(algorithm))
                if requested != algorithm.key_length_in_bytes() as u64 =>
            {
                return Err(RecipeError::invalid(
                    "lengthInBytes",
                    format!(
                        "{algorithm} requires exactly {} bytes, got {requested}",
                        algorithm.key_length_in_bytes()
                    ),
                ));
            },
            (Some(0), _) => {
                return Err(RecipeError::invalid("lengthInBytes", "must be at least 1"));
            },
            (Some(requested), _) => requested as usize,
            (None, Some(algorithm)) => algorithm.key_length_in_bytes(),
            (None, None) => 32,
        };

        Ok((length_in_bytes, None, None, None, None))
    }

    fn resolve_password_length(raw: &RawRecipe) -> Result<ResolvedLengths, RecipeError> {
        let word_list = match raw.word_list.as_deref() {
            Some(value) => WordListId::from_field(value).ok_or_else(|| {
                RecipeError::invalid("wordList", format!("unrecognized word list `{value}`"))
            })?,
            None => WordListId::default(),
        };
        let bits_per_word = WordList::Curated(word_list).bits_per_word();

        let (bits, words) = match (raw.length_in_bits, raw.length_in_words) {
            (Some(bits), Some(words)) => {
                let expected = words_for_bits(bits, bits_per_word);
                if words != expected {
                    return Err(RecipeError::invalid(
                        "lengthInWords",
                        format!(
                            "{bits} bits requires {expected} words of {word_list}, got {words}"
                        ),
                    ));
                }
                (bits, words)
            },
            (Some(bits), None) => (bits, words_for_bits(bits, bits_per_word)),
            (None, Some(words)) => ((f64::from(words) * bits_per_word).floor() as u32, words),
            (None, None) => {
                (DEFAULT_PASSWORD_BITS, words_for_bits(DEFAULT_PASSWORD_BITS, bits_per_word))
            },
        };
        if words == 0 {
            return Err(RecipeError::invalid("lengthInWords", "must derive at least one word"));
        }
        if raw.length_in_chars == Some(0) {
            return Err(RecipeError::invalid("lengthInChars", "must be at least 1 when set"));
        }

        // lengthInBytes is fixed by the word count, overwriting any value
        // the recipe carried.
        let length_in_bytes = words as usize * BYTES_PER_WORD;
        Ok((length_in_bytes, Some(bits), Some(words), raw.length_in_chars, Some(word_list)))
    }

    fn resolve_hash_costs(
        raw: &RawRecipe,
        hash_function: HashFunctionId,
    ) -> Result<(u32, Option<u64>), RecipeError> {
        if hash_function.is_memory_hard() {
            let passes = raw.hash_function_memory_passes.unwrap_or(DEFAULT_MEMORY_PASSES);
            if passes == 0 {
                return Err(RecipeError::invalid("hashFunctionMemoryPasses", "must be at least 1"));
            }
            let memory_limit =
                raw.hash_function_memory_limit_in_bytes.unwrap_or(DEFAULT_MEMORY_LIMIT_IN_BYTES);
            if memory_limit < MIN_MEMORY_LIMIT_IN_BYTES {
                return Err(RecipeError::invalid(
                    "hashFunctionMemoryLimitInBytes",
                    format!("must be at least {MIN_MEMORY_LIMIT_IN_BYTES} bytes"),
                ));
            }
            Ok((passes, Some(memory_limit)))
        } else {
            if raw.hash_function_memory_passes.is_some() {
                return Err(RecipeError::invalid(
                    "hashFunctionMemoryPasses",
                    format!("only valid for memory-hard hash functions, not {hash_function}"),
                ));
            }
            if raw.hash_function_memory_limit_in_bytes.is_some() {
                return Err(RecipeError::invalid(
                    "hashFunctionMemoryLimitInBytes",
                    format!("only valid for memory-hard hash functions, not {hash_function}"),
                ));
            }
            Ok((1, None))
        }
    }

    /// The original recipe JSON text, verbatim.
    ///
    /// This is the only form derivation may bind.
    pub fn as_json(&self) -> &str {
        &self.json
    }

    /// Consume the recipe, keeping only the verbatim text.
    pub fn into_json(self) -> String {
        self.json
    }

    /// Resolved purpose, if the recipe or the parse requirement set one.
    pub fn purpose(&self) -> Option<Purpose> {
        self.purpose
    }

    /// Resolved purpose, falling back to `default` when unset.
    pub fn effective_purpose(&self, default: Purpose) -> Purpose {
        self.purpose.unwrap_or(default)
    }

    /// Resolved algorithm, if any applies.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Number of bytes the derivation must produce.
    pub fn length_in_bytes(&self) -> usize {
        self.length_in_bytes
    }

    /// Password entropy in bits (Password recipes only).
    pub fn length_in_bits(&self) -> Option<u32> {
        self.length_in_bits
    }

    /// Number of password words (Password recipes only).
    pub fn length_in_words(&self) -> Option<u32> {
        self.length_in_words
    }

    /// Rendered-password character cap (Password recipes only).
    pub fn length_in_chars(&self) -> Option<u32> {
        self.length_in_chars
    }

    /// Curated word list id (Password recipes only).
    pub fn word_list(&self) -> Option<WordListId> {
        self.word_list
    }

    /// Resolved hash backend id.
    pub fn hash_function(&self) -> HashFunctionId {
        self.hash_function
    }

    /// Resolved pass count: the recipe's value, 2 for memory-hard
    /// backends, else 1.
    pub fn hash_function_memory_passes(&self) -> u32 {
        self.hash_function_memory_passes
    }

    /// Resolved memory budget; set exactly when the hash is memory-hard.
    pub fn hash_function_memory_limit_in_bytes(&self) -> Option<u64> {
        self.hash_function_memory_limit_in_bytes
    }

    /// Canonical "explicit" JSON mirroring every resolved field, keys in
    /// a stable order. For display and auditing only, never an input to
    /// derivation.
    pub fn to_explicit_json(&self) -> String {
        let explicit = ExplicitRecipe {
            purpose: self.purpose.map(Purpose::tag),
            algorithm: self.algorithm.map(Algorithm::as_str),
            length_in_bytes: self.length_in_bytes,
            length_in_bits: self.length_in_bits,
            length_in_words: self.length_in_words,
            length_in_chars: self.length_in_chars,
            word_list: self.word_list.map(WordListId::as_str),
            hash_function: self.hash_function.as_str(),
            hash_function_memory_passes: self.hash_function_memory_passes,
            hash_function_memory_limit_in_bytes: self.hash_function_memory_limit_in_bytes,
        };
        let Ok(json) = serde_json::to_string(&explicit) else {
            unreachable!("explicit recipe serialization cannot fail");
        };
        json
    }
}

type ResolvedLengths = (usize, Option<u32>, Option<u32>, Option<u32>, Option<WordListId>);

fn words_for_bits(bits: u32, bits_per_word: f64) -> u32 {
    (f64::from(bits) / bits_per_word).ceil() as u32
}

fn display_purpose(purpose: Option<Purpose>) -> &'static str {
    purpose.map_or("untyped", Purpose::tag)
}

/// Serialization order here defines the stable key order of the explicit
/// form.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplicitRecipe {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    purpose: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<&'static str>,
    length_in_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_in_bits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_in_words: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_in_chars: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_list: Option<&'static str>,
    hash_function: &'static str,
    hash_function_memory_passes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash_function_memory_limit_in_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_means_all_defaults() {
        let recipe = Recipe::parse("").unwrap();
        assert_eq!(recipe.purpose(), None);
        assert_eq!(recipe.algorithm(), None);
        assert_eq!(recipe.length_in_bytes(), 32);
        assert_eq!(recipe.hash_function(), HashFunctionId::Sha256);
        assert_eq!(recipe.hash_function_memory_passes(), 1);
        // The verbatim text stays empty; "{}" was only the parse input
        assert_eq!(recipe.as_json(), "");
    }

    #[test]
    fn empty_recipe_for_unsealing_key_resolves_x25519() {
        let recipe = Recipe::parse_for("{}", Purpose::UnsealingKey).unwrap();
        assert_eq!(recipe.purpose(), Some(Purpose::UnsealingKey));
        assert_eq!(recipe.algorithm(), Some(Algorithm::X25519));
        assert_eq!(recipe.length_in_bytes(), 32);
        assert_eq!(recipe.hash_function(), HashFunctionId::Sha256);
    }

    #[test]
    fn secret_recipe_allows_arbitrary_length() {
        let recipe = Recipe::parse_for(r#"{"lengthInBytes": 64}"#, Purpose::Secret).unwrap();
        assert_eq!(recipe.length_in_bytes(), 64);
    }

    #[test]
    fn malformed_json_is_a_parsing_error() {
        let result = Recipe::parse("{not json");
        assert!(matches!(result, Err(RecipeError::Json(_))));
    }

    #[test]
    fn purpose_mismatch_is_rejected() {
        let result = Recipe::parse_for(r#"{"type": "Password"}"#, Purpose::SigningKey);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "type", .. })));
    }

    #[test]
    fn unknown_purpose_is_rejected() {
        let result = Recipe::parse(r#"{"type": "Banana"}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "type", .. })));
    }

    #[test]
    fn symmetric_key_with_wrong_algorithm_is_rejected() {
        let result = Recipe::parse(r#"{"type": "SymmetricKey", "algorithm": "X25519"}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "algorithm", .. })));
    }

    #[test]
    fn secret_naming_an_algorithm_is_rejected() {
        let result = Recipe::parse(r#"{"type": "Secret", "algorithm": "Ed25519"}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "algorithm", .. })));
    }

    #[test]
    fn fixed_algorithm_length_is_enforced() {
        let result = Recipe::parse(r#"{"type": "SigningKey", "lengthInBytes": 64}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "lengthInBytes", .. })));
    }

    #[test]
    fn matching_explicit_length_is_accepted() {
        let recipe = Recipe::parse(r#"{"type": "SigningKey", "lengthInBytes": 32}"#).unwrap();
        assert_eq!(recipe.length_in_bytes(), 32);
    }

    #[test]
    fn password_defaults_to_128_bits() {
        let recipe = Recipe::parse(r#"{"type": "Password"}"#).unwrap();
        assert_eq!(recipe.length_in_bits(), Some(128));
        // ceil(128 / 9) with the default 512-word list
        assert_eq!(recipe.length_in_words(), Some(15));
        assert_eq!(recipe.length_in_bytes(), 15 * BYTES_PER_WORD);
        assert_eq!(recipe.word_list(), Some(WordListId::En512));
    }

    #[test]
    fn password_words_fix_bits_and_bytes() {
        let recipe = Recipe::parse(r#"{"type": "Password", "lengthInWords": 11}"#).unwrap();
        assert_eq!(recipe.length_in_words(), Some(11));
        // floor(11 * 9)
        assert_eq!(recipe.length_in_bits(), Some(99));
        assert_eq!(recipe.length_in_bytes(), 88);
    }

    #[test]
    fn password_bits_and_words_must_agree() {
        let agreeing =
            Recipe::parse(r#"{"type": "Password", "lengthInBits": 128, "lengthInWords": 15}"#);
        assert!(agreeing.is_ok());

        let conflicting =
            Recipe::parse(r#"{"type": "Password", "lengthInBits": 128, "lengthInWords": 11}"#);
        assert!(matches!(
            conflicting,
            Err(RecipeError::InvalidValue { field: "lengthInWords", .. })
        ));
    }

    #[test]
    fn password_respects_word_list_width() {
        // 256-word list carries 8 bits per word: 128 bits is 16 words
        let recipe =
            Recipe::parse(r#"{"type": "Password", "wordList": "EN_256"}"#).unwrap();
        assert_eq!(recipe.length_in_words(), Some(16));
        assert_eq!(recipe.word_list(), Some(WordListId::En256));
    }

    #[test]
    fn unknown_word_list_is_rejected() {
        let result = Recipe::parse(r#"{"type": "Password", "wordList": "EN_8192"}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "wordList", .. })));
    }

    #[test]
    fn zero_bit_password_is_rejected() {
        let result = Recipe::parse(r#"{"type": "Password", "lengthInBits": 0}"#);
        assert!(matches!(result, Err(RecipeError::InvalidValue { field: "lengthInWords", .. })));
    }

    #[test]
    fn password_fields_rejected_elsewhere() {
        for json in [
            r#"{"type": "Secret", "lengthInWords": 4}"#,
            r#"{"type": "SymmetricKey", "lengthInBits": 128}"#,
            r#"{"type": "UnsealingKey", "wordList": "EN_512"}"#,
            r#"{"type": "SigningKey", "lengthInChars": 20}"#,
        ] {
            let result = Recipe::parse(json);
            assert!(matches!(result, Err(RecipeError::InvalidValue { .. })), "accepted: {json}");
        }
    }

    #[test]
    fn memory_hard_defaults_apply() {
        let recipe = Recipe::parse(r#"{"hashFunction": "Argon2id"}"#).unwrap();
        assert_eq!(recipe.hash_function(), HashFunctionId::Argon2id);
        assert_eq!(recipe.hash_function_memory_passes(), 2);
        assert_eq!(recipe.hash_function_memory_limit_in_bytes(), Some(64 * 1024 * 1024));
    }

    #[test]
    fn memory_parameters_rejected_for_fast_hashes() {
        let passes = Recipe::parse(r#"{"hashFunctionMemoryPasses": 2}"#);
        assert!(matches!(
            passes,
            Err(RecipeError::InvalidValue { field: "hashFunctionMemoryPasses", .. })
        ));

        let limit = Recipe::parse(
            r#"{"hashFunction": "BLAKE2b", "hashFunctionMemoryLimitInBytes": 1048576}"#,
        );
        assert!(matches!(
            limit,
            Err(RecipeError::InvalidValue { field: "hashFunctionMemoryLimitInBytes", .. })
        ));
    }

    #[test]
    fn out_of_range_cost_parameters_are_rejected() {
        let zero_passes =
            Recipe::parse(r#"{"hashFunction": "Scrypt", "hashFunctionMemoryPasses": 0}"#);
        assert!(matches!(
            zero_passes,
            Err(RecipeError::InvalidValue { field: "hashFunctionMemoryPasses", .. })
        ));

        let tiny_memory =
            Recipe::parse(r#"{"hashFunction": "Argon2id", "hashFunctionMemoryLimitInBytes": 1024}"#);
        assert!(matches!(
            tiny_memory,
            Err(RecipeError::InvalidValue { field: "hashFunctionMemoryLimitInBytes", .. })
        ));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let recipe =
            Recipe::parse(r#"{"lengthInBytes": 16, "note": "rotated 2024-06"}"#).unwrap();
        assert_eq!(recipe.length_in_bytes(), 16);
    }

    #[test]
    fn verbatim_text_is_preserved_exactly() {
        let json = "{ \"lengthInBytes\":64 , \"type\" : \"Secret\" }";
        let recipe = Recipe::parse(json).unwrap();
        assert_eq!(recipe.as_json(), json);
    }

    #[test]
    fn explicit_form_has_stable_key_order() {
        let recipe = Recipe::parse_for("{}", Purpose::UnsealingKey).unwrap();
        assert_eq!(
            recipe.to_explicit_json(),
            r#"{"type":"UnsealingKey","algorithm":"X25519","lengthInBytes":32,"hashFunction":"SHA256","hashFunctionMemoryPasses":1}"#
        );
    }

    #[test]
    fn explicit_form_covers_password_fields() {
        let recipe = Recipe::parse(
            r#"{"type": "Password", "lengthInWords": 11, "hashFunction": "Argon2id"}"#,
        )
        .unwrap();
        assert_eq!(
            recipe.to_explicit_json(),
            concat!(
                r#"{"type":"Password","lengthInBytes":88,"lengthInBits":99,"#,
                r#""lengthInWords":11,"wordList":"EN_512","hashFunction":"Argon2id","#,
                r#""hashFunctionMemoryPasses":2,"hashFunctionMemoryLimitInBytes":67108864}"#
            )
        );
    }

    #[test]
    fn explicit_form_is_not_the_verbatim_text() {
        let recipe = Recipe::parse_for("{}", Purpose::SymmetricKey).unwrap();
        assert_ne!(recipe.to_explicit_json(), recipe.as_json());
    }
}
