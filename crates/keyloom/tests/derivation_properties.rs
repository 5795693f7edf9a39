//! Property-based tests for the derivation and sealing stack.
//!
//! These tests verify the fundamental invariants of the system:
//!
//! 1. **Determinism**: deriving twice yields byte-identical secrets and
//!    identical public keys
//! 2. **Separation**: different seeds, recipe texts or purposes never
//!    collide
//! 3. **Seal/unseal inverse**: unseal(seal(m, i), i) == m; any other key,
//!    instruction text or tampered byte fails
//! 4. **Password laws**: word count, capitalization and truncation

use keyloom::{
    KeyError, Password, Secret, SigningKey, SymmetricKey, UnsealingKey, keys::unseal_with_seed,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(60))]

    #[test]
    fn prop_secret_derivation_deterministic(
        seed in "[ -~]{1,40}",
        length in 1usize..200,
    ) {
        let recipe = format!("{{\"lengthInBytes\": {length}}}");
        let a = Secret::derive_from_seed(&seed, &recipe).unwrap();
        let b = Secret::derive_from_seed(&seed, &recipe).unwrap();
        prop_assert_eq!(a.secret_bytes(), b.secret_bytes());
        prop_assert_eq!(a.secret_bytes().len(), length);
    }

    #[test]
    fn prop_different_seeds_separate(seed_a in "[a-z]{1,20}", seed_b in "[A-Z]{1,20}") {
        let a = Secret::derive_from_seed(&seed_a, "{}").unwrap();
        let b = Secret::derive_from_seed(&seed_b, "{}").unwrap();
        prop_assert_ne!(a.secret_bytes(), b.secret_bytes());
    }

    #[test]
    fn prop_public_keys_deterministic(seed in "[ -~]{1,40}") {
        let unsealing_a = UnsealingKey::derive_from_seed(&seed, "{}").unwrap();
        let unsealing_b = UnsealingKey::derive_from_seed(&seed, "{}").unwrap();
        prop_assert_eq!(unsealing_a.public_key_bytes(), unsealing_b.public_key_bytes());

        let signing_a = SigningKey::derive_from_seed(&seed, "{}").unwrap();
        let signing_b = SigningKey::derive_from_seed(&seed, "{}").unwrap();
        prop_assert_eq!(signing_a.public_key_bytes(), signing_b.public_key_bytes());
    }

    #[test]
    fn prop_symmetric_seal_inverse(
        seed in "[a-z]{1,20}",
        message in prop::collection::vec(any::<u8>(), 1..300),
        instructions in "[ -~]{0,60}",
    ) {
        let key = SymmetricKey::derive_from_seed(&seed, "{}").unwrap();
        let package = key.seal_with_instructions(&message, &instructions).unwrap();
        prop_assert_eq!(key.unseal(&package).unwrap(), message);
    }

    #[test]
    fn prop_public_key_seal_inverse(
        seed in "[a-z]{1,20}",
        message in prop::collection::vec(any::<u8>(), 1..300),
        instructions in "[ -~]{0,60}",
    ) {
        let key = UnsealingKey::derive_from_seed(&seed, "{}").unwrap();
        let package =
            key.sealing_key().seal_with_instructions(&message, &instructions).unwrap();
        prop_assert_eq!(key.unseal(&package).unwrap(), message);
    }

    #[test]
    fn prop_flipped_ciphertext_byte_fails(
        seed in "[a-z]{1,20}",
        message in prop::collection::vec(any::<u8>(), 1..200),
        flip in any::<prop::sample::Index>(),
    ) {
        let key = SymmetricKey::derive_from_seed(&seed, "{}").unwrap();
        let package = key.seal(&message).unwrap();

        let mut ciphertext = package.ciphertext().to_vec();
        let index = flip.index(ciphertext.len());
        ciphertext[index] ^= 0x01;

        let result = key.unseal_ciphertext(&ciphertext, "");
        prop_assert!(matches!(result, Err(KeyError::Crypto(_))));
    }

    #[test]
    fn prop_wrong_instructions_fail(
        seed in "[a-z]{1,20}",
        message in prop::collection::vec(any::<u8>(), 1..200),
        instructions in "[a-z]{1,30}",
    ) {
        let altered = format!("{instructions}!");

        let symmetric = SymmetricKey::derive_from_seed(&seed, "{}").unwrap();
        let package = symmetric.seal_with_instructions(&message, &instructions).unwrap();
        let result = symmetric.unseal_ciphertext(package.ciphertext(), &altered);
        prop_assert!(matches!(result, Err(KeyError::Crypto(_))));

        let unsealing = UnsealingKey::derive_from_seed(&seed, "{}").unwrap();
        let package =
            unsealing.sealing_key().seal_with_instructions(&message, &instructions).unwrap();
        let result = unsealing.unseal_ciphertext(package.ciphertext(), &altered);
        prop_assert!(matches!(result, Err(KeyError::Crypto(_))));
    }

    #[test]
    fn prop_seed_round_trips_through_package(
        seed in "[ -~]{1,30}",
        message in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let key =
            SymmetricKey::derive_from_seed(&seed, r#"{"type": "SymmetricKey"}"#).unwrap();
        let package = key.seal(&message).unwrap();
        prop_assert_eq!(unseal_with_seed(&package, &seed).unwrap(), message);
    }

    #[test]
    fn prop_password_word_count_law(
        seed in "[ -~]{1,30}",
        words in 1u32..40,
    ) {
        let recipe = format!("{{\"type\": \"Password\", \"lengthInWords\": {words}}}");
        let password = Password::derive_from_seed(&seed, &recipe).unwrap();
        let parts: Vec<&str> = password.password().split('-').collect();

        prop_assert_eq!(parts.len(), words as usize + 1);
        prop_assert_eq!(parts[0].parse::<u32>().unwrap(), words);
    }

    #[test]
    fn prop_signatures_verify(
        seed in "[a-z]{1,20}",
        message in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let key = SigningKey::derive_from_seed(&seed, "{}").unwrap();
        let signature = key.sign(&message).unwrap();
        prop_assert!(key.signature_verification_key().verify(&message, &signature).is_ok());
    }
}
