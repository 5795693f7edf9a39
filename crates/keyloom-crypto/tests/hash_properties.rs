//! Property-based tests for the hash backends and sealing protocols.
//!
//! These tests verify the fundamental invariants of the crypto layer:
//!
//! 1. **Determinism**: same inputs always produce same outputs
//! 2. **Exact length**: every backend produces exactly the requested bytes
//! 3. **Prefix stability**: expansion never rewrites already-produced bytes
//! 4. **Round-trip**: unseal(seal(m)) == m, and any tampering fails

use keyloom_crypto::{
    BlockPrimitive, CryptoError, HashFunction,
    hash::hkdf_expand,
    seal::{public_key, symmetric},
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_fixed_block_exact_length(
        message in prop::collection::vec(any::<u8>(), 0..200),
        len in 1usize..300,
    ) {
        let out = HashFunction::FixedBlock(BlockPrimitive::Sha256)
            .hash(&message, len)
            .unwrap();
        prop_assert_eq!(out.len(), len);
    }

    #[test]
    fn prop_fixed_block_prefix_stable(
        message in prop::collection::vec(any::<u8>(), 0..200),
        len in 1usize..200,
        extra in 1usize..100,
    ) {
        let shorter = HashFunction::FixedBlock(BlockPrimitive::Blake2b256)
            .hash(&message, len)
            .unwrap();
        let longer = HashFunction::FixedBlock(BlockPrimitive::Blake2b256)
            .hash(&message, len + extra)
            .unwrap();
        prop_assert_eq!(shorter.as_bytes(), &longer.as_bytes()[..len]);
    }

    #[test]
    fn prop_fixed_block_deterministic(
        message in prop::collection::vec(any::<u8>(), 0..200),
        len in 1usize..128,
    ) {
        let first = HashFunction::FixedBlock(BlockPrimitive::Sha256).hash(&message, len).unwrap();
        let second = HashFunction::FixedBlock(BlockPrimitive::Sha256).hash(&message, len).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_hkdf_deterministic_and_prefix_stable(
        ikm in prop::collection::vec(any::<u8>(), 1..64),
        info in prop::collection::vec(any::<u8>(), 0..64),
        len in 1usize..200,
    ) {
        let first = hkdf_expand::expand(&ikm, &info, len).unwrap();
        let second = hkdf_expand::expand(&ikm, &info, len).unwrap();
        prop_assert_eq!(&first, &second);

        let longer = hkdf_expand::expand(&ikm, &info, len + 1).unwrap();
        prop_assert_eq!(first.as_bytes(), &longer.as_bytes()[..len]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_symmetric_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..500),
        key in any::<[u8; 32]>(),
        instructions in ".{0,60}",
    ) {
        let sealed = symmetric::seal(&plaintext, &key, &instructions);
        let opened = symmetric::unseal(&sealed, &key, &instructions).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn prop_symmetric_tamper_fails(
        plaintext in prop::collection::vec(any::<u8>(), 1..200),
        key in any::<[u8; 32]>(),
        flip_index in any::<prop::sample::Index>(),
    ) {
        let mut sealed = symmetric::seal(&plaintext, &key, "ctx");
        let index = flip_index.index(sealed.len());
        sealed[index] ^= 0x01;
        let result = symmetric::unseal(&sealed, &key, "ctx");
        let matched = matches!(result, Err(CryptoError::Verification { .. }));
        prop_assert!(matched);
    }

    #[test]
    fn prop_public_key_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..500),
        secret in any::<[u8; 32]>(),
        ephemeral in any::<[u8; 32]>(),
        instructions in ".{0,60}",
    ) {
        let public = public_key::public_key_for_secret(&secret);
        let sealed = public_key::seal(&plaintext, &public, &instructions, ephemeral);
        let opened = public_key::unseal(&sealed, &secret, &instructions).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn prop_public_key_tamper_fails(
        plaintext in prop::collection::vec(any::<u8>(), 1..200),
        secret in any::<[u8; 32]>(),
        ephemeral in any::<[u8; 32]>(),
        flip_index in any::<prop::sample::Index>(),
    ) {
        let public = public_key::public_key_for_secret(&secret);
        let mut sealed = public_key::seal(&plaintext, &public, "", ephemeral);
        let index = flip_index.index(sealed.len());
        sealed[index] ^= 0x01;
        let result = public_key::unseal(&sealed, &secret, "");
        let matched = matches!(result, Err(CryptoError::Verification { .. }));
        prop_assert!(matched);
    }

    #[test]
    fn prop_wrong_instructions_never_unseal(
        plaintext in prop::collection::vec(any::<u8>(), 0..200),
        key in any::<[u8; 32]>(),
        instructions in "[a-z]{1,30}",
        altered in "[A-Z]{1,30}",
    ) {
        let sealed = symmetric::seal(&plaintext, &key, &instructions);
        let result = symmetric::unseal(&sealed, &key, &altered);
        let matched = matches!(result, Err(CryptoError::Verification { .. }));
        prop_assert!(matched);
    }
}
