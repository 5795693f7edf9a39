//! Fuzz target for the sealed-message container decoders
//!
//! This fuzzer tests both container forms with arbitrary bytes to find:
//! - Decoder crashes or panics
//! - Integer overflows in length-prefix arithmetic
//! - Buffer over-reads on truncated input
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error, and every successful decode must re-encode to the same value.

#![no_main]

use keyloom_proto::PackagedSealedMessage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(package) = PackagedSealedMessage::from_binary(data) {
        // Decoded containers must round-trip exactly
        let encoded = package.to_binary().expect("decoded package must re-encode");
        assert_eq!(encoded, data);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = PackagedSealedMessage::from_json(text);
    }
});
