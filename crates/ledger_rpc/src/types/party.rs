//! Ledger participants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// X.500-style legal name of a node, e.g. `O=Bank A,L=London,C=GB`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegalName(String);

impl LegalName {
    /// Wrap a legal name string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LegalName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identity of a ledger participant as reported by its node.
///
/// Opaque to the orchestration layer: it is obtained once per session and
/// passed back to flows as a recipient or notary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    /// Legal name of the participant
    pub name: LegalName,
    /// Encoded public key the participant signs with
    pub owning_key: String,
}

impl Party {
    /// Create a party
    pub fn new(name: impl Into<LegalName>, owning_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owning_key: owning_key.into(),
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<String> for LegalName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
