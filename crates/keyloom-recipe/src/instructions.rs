//! Unsealing-instructions documents.
//!
//! Instructions are free-form JSON bound into a sealed message's
//! authentication through nonce derivation. The cryptographic check only
//! proves the text is byte-identical; the policy fields parsed here are
//! enforced by the consumer presenting the unsealed message, not by the
//! core.

use serde::Deserialize;

use crate::error::RecipeError;

/// The raw instruction schema. Unknown fields are tolerated, as with
/// recipes: the verbatim text is what sealing binds.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstructions {
    android_package_prefixes_allowed: Option<Vec<String>>,
    user_must_acknowledge_this_message: Option<String>,
}

/// Parsed unsealing instructions.
///
/// Keeps the original text verbatim; equality of that text, not of the
/// parsed structure, is what unsealing verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsealingInstructions {
    json: String,
    package_prefixes_allowed: Vec<String>,
    user_must_acknowledge: Option<String>,
}

impl UnsealingInstructions {
    /// Parse an instruction document. An empty string carries no policy.
    pub fn parse(json: &str) -> Result<Self, RecipeError> {
        let document = if json.is_empty() { "{}" } else { json };
        let raw: RawInstructions = serde_json::from_str(document)?;
        Ok(Self {
            json: json.to_owned(),
            // The default prefix list contains the empty prefix, which
            // matches every caller.
            package_prefixes_allowed: raw
                .android_package_prefixes_allowed
                .unwrap_or_else(|| vec![String::new()]),
            user_must_acknowledge: raw.user_must_acknowledge_this_message,
        })
    }

    /// The original instruction text, verbatim. This is what sealing
    /// binds.
    pub fn as_json(&self) -> &str {
        &self.json
    }

    /// True when `package` starts with any allowed prefix.
    ///
    /// Consumer-side policy: the core never calls this during unsealing.
    pub fn is_package_allowed(&self, package: &str) -> bool {
        self.package_prefixes_allowed.iter().any(|prefix| package.starts_with(prefix.as_str()))
    }

    /// Allowed caller prefixes.
    pub fn package_prefixes_allowed(&self) -> &[String] {
        &self.package_prefixes_allowed
    }

    /// Message the consumer must show and have acknowledged before using
    /// the unsealed plaintext.
    pub fn user_must_acknowledge(&self) -> Option<&str> {
        self.user_must_acknowledge.as_deref()
    }
}
