//! Keyloom Recipes
//!
//! A recipe is a small JSON document describing what kind of secret to
//! derive and how: purpose, algorithm, length, word list and hash-function
//! cost parameters. This crate parses and validates recipes in a single
//! fail-fast pass, applies purpose-dependent defaults, reconciles password
//! lengths given in bits, words or bytes, and re-serializes a canonical
//! "explicit" form for display.
//!
//! The parsed [`Recipe`] keeps the original JSON text verbatim. That text,
//! not the parsed structure, is what the derivation pipeline binds: two
//! recipes that parse identically but were written differently derive
//! different secrets. The canonical form exists for auditing only.
//!
//! Validation happens before any cryptographic work: an invalid recipe
//! never reaches the hash or sealing layers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod error;
pub mod hash_function;
pub mod instructions;
pub mod purpose;
pub mod recipe;
pub mod word_list;

pub use algorithm::Algorithm;
pub use error::RecipeError;
pub use hash_function::HashFunctionId;
pub use instructions::UnsealingInstructions;
pub use purpose::Purpose;
pub use recipe::Recipe;
pub use word_list::{WordList, WordListId};
