//! Connection endpoint value objects.

use super::NegotiationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated remote agent endpoint.
///
/// The value is trimmed and must be non-empty. No scheme validation is
/// applied: environment-discovered values may be bare host or port strings
/// rather than full URLs, and validating them is the prober's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentUrl(String);

impl AgentUrl {
    /// Creates a validated agent URL.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationDomainError::EmptyAgentUrl`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, NegotiationDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(NegotiationDomainError::EmptyAgentUrl);
        }
        Ok(Self(normalized))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the mechanism that produced a connection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySource {
    /// A well-known local service registry answered the lookup.
    Registry,
    /// A local-network broadcast answered the lookup.
    Broadcast,
    /// A well-known environment variable supplied the endpoint.
    Environment,
    /// The caller-supplied override URL was adopted.
    Override,
}

impl DiscoverySource {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Broadcast => "broadcast",
            Self::Environment => "environment",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved connection endpoint for one negotiation attempt.
///
/// Exactly one descriptor exists per negotiation; it is constructed once
/// when discovery completes and offers no mutators. The undiscovered state
/// is a valid terminal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<AgentUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discovered_via: Option<DiscoverySource>,
}

impl ConnectionDescriptor {
    /// Creates the undiscovered terminal state.
    #[must_use]
    pub const fn undiscovered() -> Self {
        Self {
            url: None,
            discovered_via: None,
        }
    }

    /// Creates a descriptor for an endpoint produced by `source`.
    #[must_use]
    pub const fn discovered(url: AgentUrl, source: DiscoverySource) -> Self {
        Self {
            url: Some(url),
            discovered_via: Some(source),
        }
    }

    /// Returns the resolved endpoint, if any.
    #[must_use]
    pub const fn url(&self) -> Option<&AgentUrl> {
        self.url.as_ref()
    }

    /// Returns the mechanism that produced the endpoint, if any.
    #[must_use]
    pub const fn discovered_via(&self) -> Option<DiscoverySource> {
        self.discovered_via
    }

    /// Returns whether an endpoint was resolved.
    #[must_use]
    pub const fn is_discovered(&self) -> bool {
        self.url.is_some()
    }
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        Self::undiscovered()
    }
}
