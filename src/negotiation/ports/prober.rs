//! Capability prober port for querying a discovered endpoint.

use crate::negotiation::domain::{
    AgentUrl, AuthenticationDescriptor, CapabilitySet, Protocol,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for prober operations.
pub type ProbeResult<T> = Result<T, ProberError>;

/// Capability and authentication data extracted by a probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// Capabilities the endpoint advertised.
    pub capabilities: CapabilitySet,
    /// Authentication material the endpoint advertised.
    pub authentication: AuthenticationDescriptor,
}

impl ProbeReport {
    /// Creates an empty report, meaning "nothing learned".
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            capabilities: CapabilitySet::new(),
            authentication: AuthenticationDescriptor::new(),
        }
    }
}

/// Queries a resolved endpoint for its capabilities and liveness.
///
/// Probing and health checking are independent queries: a reachable
/// endpoint with no capability document is still verified, and capability
/// data never implies the health check passed.
#[async_trait]
pub trait CapabilityProber: Send + Sync {
    /// Issues a capability query against the endpoint.
    async fn probe(
        &self,
        url: &AgentUrl,
        protocol: Protocol,
        timeout: Duration,
    ) -> ProbeResult<ProbeReport>;

    /// Issues a liveness query against the endpoint; the returned boolean is
    /// the sole determinant of connection verification.
    async fn health_check(
        &self,
        url: &AgentUrl,
        protocol: Protocol,
        timeout: Duration,
    ) -> ProbeResult<bool>;
}

/// Errors returned by capability prober implementations.
#[derive(Debug, Clone, Error)]
pub enum ProberError {
    /// The protocol has no probe implementation. A permanent condition for
    /// the declared-but-unimplemented protocol variants, treated as a soft
    /// failure by the orchestrator.
    #[error("no probe implementation for protocol '{0}'")]
    UnsupportedProtocol(Protocol),

    /// The outbound request failed (connection refused, timeout, TLS).
    #[error("probe transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// Queried URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The endpoint's response body could not be interpreted.
    #[error("malformed probe response from {url}: {reason}")]
    MalformedResponse {
        /// Queried URL.
        url: String,
        /// Reason string.
        reason: String,
    },
}

impl ProberError {
    /// Wraps a transport error from the HTTP client.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
