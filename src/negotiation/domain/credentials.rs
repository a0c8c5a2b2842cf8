//! Opaque authentication material collected during negotiation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Credential fields reported by discovery or probing.
///
/// The mapping is opaque to the negotiation core: field names and values are
/// carried through to the caller without interpretation. An empty descriptor
/// is valid and means "no credentials known", which is distinct from the
/// field being absent; results always carry a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticationDescriptor(BTreeMap<String, Value>);

impl AuthenticationDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a descriptor from credential field entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Returns the value of a credential field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns whether no credential fields are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of credential fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merges `other` into this descriptor, with `other` winning on
    /// conflicting field names.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterates over credential field entries in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
