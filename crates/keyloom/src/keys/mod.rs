//! Derived key objects.
//!
//! Each type wraps the secret half in a [`keyloom_crypto::SecureBuffer`],
//! carries the public half where one exists, and retains the verbatim
//! recipe text that produced it, so any holder of the original seed can
//! re-derive the identical object from the recipe alone.
//!
//! Every type supports two constructions: derivation from
//! (seed, recipe text) and reconstitution from raw bytes, plus JSON (hex)
//! and length-prefixed binary serialization with round-trip guarantees.

pub mod password;
pub mod sealing;
pub mod secret;
pub mod signing;
pub mod symmetric;

use keyloom_proto::PackagedSealedMessage;
use keyloom_recipe::{Purpose, Recipe, RecipeError};

pub use password::Password;
pub use sealing::{SealingKey, UnsealingKey};
pub use secret::Secret;
pub use signing::{SignatureVerificationKey, SigningKey};
pub use symmetric::SymmetricKey;

use crate::error::KeyError;

/// Unseal a packaged message using only the seed.
///
/// The package's embedded recipe text re-derives the key; its `type`
/// field selects the sealing protocol. Works for packages sealed with a
/// [`SymmetricKey`] or a [`SealingKey`].
///
/// # Errors
///
/// - [`KeyError::Recipe`] when the embedded recipe does not parse, or
///   does not name a purpose that seals
/// - [`KeyError::Crypto`] when authenticated unsealing fails
pub fn unseal_with_seed(
    package: &PackagedSealedMessage,
    seed: &str,
) -> Result<Vec<u8>, KeyError> {
    let recipe = Recipe::parse(package.recipe())?;
    match recipe.purpose() {
        Some(Purpose::SymmetricKey) => {
            SymmetricKey::derive_from_seed(seed, package.recipe())?.unseal(package)
        },
        Some(Purpose::UnsealingKey) => {
            UnsealingKey::derive_from_seed(seed, package.recipe())?.unseal(package)
        },
        other => Err(KeyError::Recipe(RecipeError::InvalidValue {
            field: "type",
            reason: format!(
                "cannot infer a sealing protocol from purpose {}",
                other.map_or("<unset>", Purpose::tag)
            ),
        })),
    }
}
