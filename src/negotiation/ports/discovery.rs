//! Discovery strategy port for locating a remote agent endpoint.

use crate::negotiation::domain::{
    AgentUrl, AuthenticationDescriptor, CapabilitySet, DiscoverySource,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for discovery strategy attempts.
pub type DiscoveryResult<T> = Result<T, DiscoveryStrategyError>;

/// Shared inputs for one discovery pass.
///
/// Carries the per-request timeout budget and any override URL the caller
/// supplied up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryContext {
    timeout: Duration,
    override_url: Option<AgentUrl>,
}

impl DiscoveryContext {
    /// Creates a context with the given timeout budget and no override URL.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            override_url: None,
        }
    }

    /// Attaches a caller-supplied override URL.
    #[must_use]
    pub fn with_override_url(mut self, url: AgentUrl) -> Self {
        self.override_url = Some(url);
        self
    }

    /// Returns the timeout budget for each outbound lookup.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the override URL, if the caller supplied one.
    #[must_use]
    pub const fn override_url(&self) -> Option<&AgentUrl> {
        self.override_url.as_ref()
    }
}

/// Endpoint and partial agent data produced by a successful strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryFinding {
    /// Located connection endpoint.
    pub url: AgentUrl,
    /// Authentication material reported alongside the endpoint.
    pub authentication: AuthenticationDescriptor,
    /// Capability metadata reported alongside the endpoint.
    pub capabilities: CapabilitySet,
}

impl DiscoveryFinding {
    /// Creates a finding carrying only an endpoint.
    #[must_use]
    pub const fn endpoint_only(url: AgentUrl) -> Self {
        Self {
            url,
            authentication: AuthenticationDescriptor::new(),
            capabilities: CapabilitySet::new(),
        }
    }
}

/// One mechanism for locating a remote agent's connection endpoint.
///
/// Strategies report `Ok(None)` when they complete without locating an
/// agent. An `Err` signals an internal fault (unreachable backend,
/// malformed response); the discovery chain logs it as a soft failure and
/// moves on, so a strategy fault is never fatal to the negotiation.
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Identifies this strategy in `discovered_via` fields and logs.
    fn source(&self) -> DiscoverySource;

    /// Attempts to locate a remote agent within the context's timeout.
    async fn attempt(&self, context: &DiscoveryContext) -> DiscoveryResult<Option<DiscoveryFinding>>;
}

/// Errors returned by discovery strategy implementations.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryStrategyError {
    /// The underlying lookup transport failed.
    #[error("discovery lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),

    /// A discovery source answered with data that could not be interpreted.
    #[error("malformed discovery response from {origin}: {reason}")]
    MalformedResponse {
        /// Strategy that received the response.
        origin: DiscoverySource,
        /// Reason string.
        reason: String,
    },
}

impl DiscoveryStrategyError {
    /// Wraps a transport error from the lookup backend.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
