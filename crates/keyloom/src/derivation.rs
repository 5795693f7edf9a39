//! The deterministic (seed, recipe, purpose) → raw-bytes pipeline.
//!
//! The preimage is `seed || '0' || purposeTag || recipeText`, where
//! `recipeText` is the ORIGINAL recipe JSON, never the canonical form.
//! Identical inputs yield byte-identical output across runs and
//! processes; everything downstream (keys, passwords, sealed messages)
//! inherits its determinism from here.

use keyloom_crypto::{BlockPrimitive, HashFunction, SecureBuffer, hash::hkdf_expand};
use keyloom_recipe::{HashFunctionId, Purpose, Recipe, hash_function::DEFAULT_MEMORY_LIMIT_IN_BYTES};
use zeroize::Zeroizing;

use crate::error::KeyError;

/// Separator between the seed and the context segments of the preimage.
///
/// Historical format note: this is the ASCII digit `'0'`, not a NUL
/// byte. Every secret ever derived depends on it staying that way.
const PREIMAGE_SEPARATOR: u8 = b'0';

/// Derive the raw secret bytes a recipe asks for.
///
/// `default_purpose` supplies the preimage tag when the recipe leaves
/// `type` unset; each typed entry point passes its own purpose.
///
/// # Errors
///
/// - [`KeyError::Crypto`] when the selected hash backend rejects the
///   output length or cost parameters, or runs out of memory
pub fn derive_secret_bytes(
    seed: &str,
    recipe: &Recipe,
    default_purpose: Purpose,
) -> Result<SecureBuffer, KeyError> {
    let purpose = recipe.effective_purpose(default_purpose);
    let output_length = recipe.length_in_bytes();

    tracing::debug!(
        purpose = purpose.tag(),
        hash_function = %recipe.hash_function(),
        output_length,
        "deriving secret bytes"
    );

    let bytes = match recipe.hash_function() {
        HashFunctionId::Sha256 => {
            let preimage = build_preimage(seed, purpose, recipe.as_json());
            HashFunction::FixedBlock(BlockPrimitive::Sha256).hash(&preimage, output_length)?
        },
        HashFunctionId::Blake2b => {
            // Expand-only path: the seed is the input keying material and
            // the purpose/recipe context moves into the info string. No
            // extraction salt; the seed is the caller-held secret and the
            // info already separates contexts.
            let info = build_info(purpose, recipe.as_json());
            hkdf_expand::expand(seed.as_bytes(), &info, output_length)?
        },
        HashFunctionId::Argon2id => {
            let preimage = build_preimage(seed, purpose, recipe.as_json());
            HashFunction::Argon2id {
                passes: recipe.hash_function_memory_passes(),
                memory_limit_in_bytes: memory_limit(recipe),
            }
            .hash(&preimage, output_length)?
        },
        HashFunctionId::Scrypt => {
            let preimage = build_preimage(seed, purpose, recipe.as_json());
            HashFunction::Scrypt {
                passes: recipe.hash_function_memory_passes(),
                memory_limit_in_bytes: memory_limit(recipe),
            }
            .hash(&preimage, output_length)?
        },
    };
    Ok(bytes)
}

fn memory_limit(recipe: &Recipe) -> u64 {
    recipe.hash_function_memory_limit_in_bytes().unwrap_or(DEFAULT_MEMORY_LIMIT_IN_BYTES)
}

fn build_preimage(seed: &str, purpose: Purpose, recipe_json: &str) -> Zeroizing<Vec<u8>> {
    let tag = purpose.tag();
    let mut preimage =
        Zeroizing::new(Vec::with_capacity(seed.len() + 1 + tag.len() + recipe_json.len()));
    preimage.extend_from_slice(seed.as_bytes());
    preimage.push(PREIMAGE_SEPARATOR);
    preimage.extend_from_slice(tag.as_bytes());
    preimage.extend_from_slice(recipe_json.as_bytes());
    preimage
}

fn build_info(purpose: Purpose, recipe_json: &str) -> Vec<u8> {
    let tag = purpose.tag();
    let mut info = Vec::with_capacity(tag.len() + recipe_json.len());
    info.extend_from_slice(tag.as_bytes());
    info.extend_from_slice(recipe_json.as_bytes());
    info
}
