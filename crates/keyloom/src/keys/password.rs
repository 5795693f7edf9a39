//! Derived dictionary-word passwords.

use std::fmt;

use keyloom_proto::wire::{FieldReader, put_field};
use keyloom_recipe::{Purpose, Recipe, RecipeError, WordList};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{derivation, error::KeyError};

/// A human-readable password derived from a seed and recipe.
///
/// The derived bytes are consumed in 8-byte big-endian chunks; each chunk
/// selects one dictionary word modulo the word-list length. The rendered
/// string is `count-Word-word-...`: the word count first, words joined by
/// `-`, the first letter of the first word capitalized.
pub struct Password {
    password: Zeroizing<String>,
    recipe: String,
}

#[derive(Serialize, Deserialize)]
struct PasswordJson {
    password: String,
    #[serde(default)]
    recipe: String,
}

impl Password {
    /// Derive against the recipe's curated word list (default `EN_512`).
    ///
    /// The recipe's `type` must be `Password` or unset.
    pub fn derive_from_seed(seed: &str, recipe_json: &str) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::Password)?;
        let word_list = WordList::Curated(recipe.word_list().unwrap_or_default());
        Self::derive_with_list(seed, recipe, &word_list)
    }

    /// Derive against a caller-supplied literal word list.
    ///
    /// `word_list_text` is split on runs of non-alphabetic characters.
    /// The number of derived bytes still comes from the recipe; only the
    /// word selection uses the custom list.
    pub fn derive_from_seed_with_word_list(
        seed: &str,
        recipe_json: &str,
        word_list_text: &str,
    ) -> Result<Self, KeyError> {
        let recipe = Recipe::parse_for(recipe_json, Purpose::Password)?;
        let word_list = WordList::from_text(word_list_text).ok_or_else(|| {
            KeyError::Recipe(RecipeError::InvalidValue {
                field: "wordList",
                reason: "custom word list contains no words".to_owned(),
            })
        })?;
        Self::derive_with_list(seed, recipe, &word_list)
    }

    fn derive_with_list(
        seed: &str,
        recipe: Recipe,
        word_list: &WordList,
    ) -> Result<Self, KeyError> {
        let bytes = derivation::derive_secret_bytes(seed, &recipe, Purpose::Password)?;
        let rendered = render(bytes.as_bytes(), word_list, recipe.length_in_chars());
        Ok(Self { password: Zeroizing::new(rendered), recipe: recipe.into_json() })
    }

    /// Reconstitute from a rendered password and the recipe text that
    /// produced it.
    pub fn from_password(password: String, recipe: String) -> Self {
        Self { password: Zeroizing::new(password), recipe }
    }

    /// The rendered password. Read access only.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Verbatim recipe text this password was derived from.
    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Serialize to the JSON form.
    pub fn to_json(&self) -> String {
        let json =
            PasswordJson { password: self.password.to_string(), recipe: self.recipe.clone() };
        let Ok(out) = serde_json::to_string(&json) else {
            unreachable!("password serialization cannot fail");
        };
        out
    }

    /// Deserialize the JSON form.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let parsed: PasswordJson =
            serde_json::from_str(json).map_err(keyloom_proto::PackageError::Json)?;
        Ok(Self::from_password(parsed.password, parsed.recipe))
    }

    /// Serialize to the length-prefixed binary form.
    pub fn to_serialized_binary_form(&self) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::new();
        put_field(&mut out, "password", self.password.as_bytes())?;
        put_field(&mut out, "recipe", self.recipe.as_bytes())?;
        Ok(out)
    }

    /// Deserialize the length-prefixed binary form.
    pub fn from_serialized_binary_form(input: &[u8]) -> Result<Self, KeyError> {
        let mut reader = FieldReader::new(input);
        let password = reader.read_string("password")?;
        let recipe = reader.read_string("recipe")?;
        reader.finish()?;
        Ok(Self::from_password(password, recipe))
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        *self.password == *other.password && self.recipe == other.recipe
    }
}

impl Eq for Password {}

/// Never prints the password itself.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("password", &"<redacted>")
            .field("recipe", &self.recipe)
            .finish()
    }
}

fn render(bytes: &[u8], word_list: &WordList, length_in_chars: Option<u32>) -> String {
    let list_length = word_list.len() as u64;
    let mut rendered = String::new();
    let word_count = bytes.len() / 8;
    rendered.push_str(&word_count.to_string());

    for (position, chunk) in bytes.chunks_exact(8).enumerate() {
        let Ok(chunk_array) = <[u8; 8]>::try_from(chunk) else {
            unreachable!("chunks_exact produces 8-byte chunks");
        };
        let index = (u64::from_be_bytes(chunk_array) % list_length) as usize;
        let word = word_list.word(index);

        rendered.push('-');
        if position == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                rendered.extend(first.to_uppercase());
                rendered.push_str(chars.as_str());
            }
        } else {
            rendered.push_str(word);
        }
    }

    if let Some(max_chars) = length_in_chars
        && let Some((cut, _)) = rendered.char_indices().nth(max_chars as usize)
    {
        rendered.truncate(cut);
    }
    rendered
}
