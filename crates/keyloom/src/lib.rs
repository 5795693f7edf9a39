//! Keyloom
//!
//! Regenerate the same cryptographic secrets, key pairs and passwords
//! over and over from a seed string and a recipe: a small, human-auditable
//! JSON document describing what to produce and how. Nothing is stored;
//! everything is re-derived on demand.
//!
//! # Derivation
//!
//! ```text
//! Seed string + Recipe JSON
//!        │
//!        ▼
//! Preimage (seed || '0' || purpose tag || recipe text)
//!        │
//!        ▼
//! Hash backend (SHA-256 chain / HKDF-BLAKE2b / Argon2id / scrypt)
//!        │
//!        ▼
//! Raw secret bytes
//!        │
//!        ├── Secret            (raw bytes)
//!        ├── SymmetricKey      (XSalsa20-Poly1305)
//!        ├── UnsealingKey pair (X25519)
//!        ├── SigningKey pair   (Ed25519)
//!        └── Password          (dictionary words)
//! ```
//!
//! The recipe text participates in derivation verbatim: reformatting a
//! recipe, even without changing its meaning, derives different secrets.
//! Equal (seed, recipe text, purpose) always reproduces byte-identical
//! keys, across runs and processes.
//!
//! # Sealing
//!
//! Derived keys seal messages into [`PackagedSealedMessage`]s that carry
//! the recipe text and the unsealing-instructions text alongside the
//! ciphertext. Holding the seed and the package is enough to unseal; the
//! instruction text is cryptographically bound, so altering it denies
//! access.
//!
//! ```no_run
//! use keyloom::{SymmetricKey, keys::unseal_with_seed};
//!
//! # fn main() -> Result<(), keyloom::KeyError> {
//! let key = SymmetricKey::derive_from_seed("my seed", r#"{"type":"SymmetricKey"}"#)?;
//! let package = key.seal_with_instructions(b"the plans", r#"{"userMustAcknowledgeThisMessage":"Handle with care"}"#)?;
//!
//! // Later, anywhere, from the seed alone:
//! let plans = unseal_with_seed(&package, "my seed")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Every operation is a synchronous pure function of its inputs; there is
//! no shared state and nothing to initialize. Memory-hard recipes are
//! intentionally expensive; callers on latency-sensitive paths should
//! derive on a worker.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod derivation;
pub mod error;
pub mod keys;

pub use error::KeyError;
pub use keyloom_crypto::SecureBuffer;
pub use keyloom_proto::PackagedSealedMessage;
pub use keyloom_recipe::{Purpose, Recipe, UnsealingInstructions};
pub use keys::{
    Password, SealingKey, Secret, SignatureVerificationKey, SigningKey, SymmetricKey,
    UnsealingKey,
};
