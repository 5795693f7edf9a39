//! Fuzz target for recipe and instruction parsing
//!
//! This fuzzer feeds arbitrary text into the recipe validator to find:
//! - Parser crashes or panics
//! - Arithmetic overflows in length reconciliation
//! - Validation paths that accept out-of-range values
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error.

#![no_main]

use keyloom_recipe::{Purpose, Recipe, UnsealingInstructions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Every purpose requirement exercises different validation branches
    let _ = Recipe::parse(text);
    let _ = Recipe::parse_for(text, Purpose::Password);
    let _ = Recipe::parse_for(text, Purpose::SymmetricKey);
    let _ = UnsealingInstructions::parse(text);

    // A recipe that validates must canonicalize and re-validate cleanly
    if let Ok(recipe) = Recipe::parse(text) {
        let explicit = recipe.to_explicit_json();
        let _ = Recipe::parse(&explicit);
    }
});
