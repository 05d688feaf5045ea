//! Claim identity derivation
//!
//! The identity is a SHA-256 over the claim's content and the UTC calendar day it
//! was submitted on. Two identical submissions on the same day collide and are
//! deduplicated by the store's conditional insert; the same content on another day
//! is a new claim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::claim::{FIELD_AMOUNT, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_OWNER_ID};

const ID_PREFIX: &str = "EXP-";

/// Number of digest bytes kept in the identity (32 hex chars)
const ID_BYTES: usize = 16;

/// Deterministic claim identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Derive an identity from already-canonical component strings
    pub fn derive(
        owner_id: &str,
        amount: &str,
        category: &str,
        description: &str,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let day = submitted_at.format("%Y-%m-%d").to_string();

        let mut hasher = Sha256::new();
        for part in [owner_id, amount, category, description, day.as_str()] {
            hasher.update(part.as_bytes());
            // Unit separator keeps ("ab", "c") and ("a", "bc") apart
            hasher.update([0x1f]);
        }
        let digest = hasher.finalize();

        Self(format!("{}{}", ID_PREFIX, hex::encode_upper(&digest[..ID_BYTES])))
    }

    /// Derive an identity from raw submitted fields.
    ///
    /// Works on invalid submissions too, so rejected claims are deduplicated the
    /// same way as accepted ones. Each field is hashed together with its JSON type.
    pub fn from_fields(fields: &Map<String, Value>, submitted_at: DateTime<Utc>) -> Self {
        Self::derive(
            &tagged_text(fields.get(FIELD_OWNER_ID)),
            &tagged_text(fields.get(FIELD_AMOUNT)),
            &tagged_text(fields.get(FIELD_CATEGORY)),
            &tagged_text(fields.get(FIELD_DESCRIPTION)),
            submitted_at,
        )
    }

    /// Wrap an existing identity string (e.g. from a CLI argument)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical text of one submitted field, tagged with its JSON type so that
/// `"45"` and `45` (or `"7"` and `7`) never hash alike. Missing and null hash as
/// the empty string.
fn tagged_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => format!("s:{}", s),
        // numbers are normalized so `45`, `45.0` and `45.00` hash alike
        Some(Value::Number(n)) => {
            let text = Decimal::from_str(&n.to_string())
                .map(|d| d.normalize().to_string())
                .unwrap_or_else(|_| n.to_string());
            format!("n:{}", text)
        }
        Some(other) => format!("j:{}", other),
    }
}
