//! Fuzz target for unsealing with attacker-controlled ciphertext
//!
//! This fuzzer hands arbitrary bytes to both unsealing protocols to find:
//! - Panics on malformed or truncated ciphertext
//! - Nonce or key framing over-reads
//! - Paths where garbage input unseals successfully
//!
//! The fuzzer should NEVER panic, and garbage should never authenticate.

#![no_main]

use keyloom::{SymmetricKey, UnsealingKey};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let symmetric = SymmetricKey::derive_from_seed("fuzz seed", "{}")
        .expect("fixed recipe must derive");
    assert!(
        symmetric.unseal_ciphertext(data, "instructions").is_err(),
        "arbitrary bytes must never authenticate"
    );

    let unsealing = UnsealingKey::derive_from_seed("fuzz seed", "{}")
        .expect("fixed recipe must derive");
    assert!(
        unsealing.unseal_ciphertext(data, "instructions").is_err(),
        "arbitrary bytes must never authenticate"
    );
});
