//! Capability metadata reported by a remote agent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Capabilities advertised by the remote agent.
///
/// Maps capability names to supported-flags or detail objects, exactly as
/// reported by discovery or probing. An empty set is valid and means
/// "capabilities unknown or unsupported"; results always carry a set, so
/// callers can distinguish "unknown" (empty) from a missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeMap<String, Value>);

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a capability set from name/detail entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Returns the detail value for a capability, if reported.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns whether no capabilities are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of reported capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merges `other` into this set, with `other` winning on conflicting
    /// capability names.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterates over capability entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
