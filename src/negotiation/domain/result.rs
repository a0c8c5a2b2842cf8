//! Negotiation result aggregate.

use super::{
    AgentType, AuthenticationDescriptor, CapabilitySet, ConfigMode, ConnectionDescriptor, Protocol,
    SynchronizationPolicy,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for one negotiation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NegotiationId(Uuid);

impl NegotiationId {
    /// Creates a new random negotiation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a negotiation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for NegotiationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NegotiationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serializes timeouts as whole seconds, matching the caller-facing
/// configuration document.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Immutable snapshot produced by one negotiation attempt.
///
/// Authentication and capability data may be empty but are always present;
/// `connection_verified` reports only the health-check outcome and never
/// implies capability data exists. Each call produces a fresh snapshot;
/// nothing is shared or reused across negotiations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationResult {
    negotiation_id: NegotiationId,
    agent_type: AgentType,
    protocol: Protocol,
    #[serde(with = "duration_secs")]
    timeout: Duration,
    config_mode: ConfigMode,
    connection: ConnectionDescriptor,
    authentication: AuthenticationDescriptor,
    capabilities: CapabilitySet,
    synchronization: SynchronizationPolicy,
    connection_verified: bool,
    negotiated_at: DateTime<Utc>,
}

/// Parameter object for assembling a negotiation result.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationResultData {
    /// Agent type the negotiation ran for.
    pub agent_type: AgentType,
    /// Protocol the negotiation ran for.
    pub protocol: Protocol,
    /// Per-request timeout budget that governed the attempt.
    pub timeout: Duration,
    /// Configuration mode that governed connection resolution.
    pub config_mode: ConfigMode,
    /// Resolved connection endpoint.
    pub connection: ConnectionDescriptor,
    /// Collected authentication material.
    pub authentication: AuthenticationDescriptor,
    /// Collected capability metadata.
    pub capabilities: CapabilitySet,
    /// Agreed synchronization policy.
    pub synchronization: SynchronizationPolicy,
    /// Health-check outcome for the resolved endpoint.
    pub connection_verified: bool,
}

impl NegotiationResult {
    /// Assembles a result snapshot, stamping a fresh identifier and the
    /// current time.
    #[must_use]
    pub fn new(data: NegotiationResultData, clock: &impl Clock) -> Self {
        Self {
            negotiation_id: NegotiationId::new(),
            agent_type: data.agent_type,
            protocol: data.protocol,
            timeout: data.timeout,
            config_mode: data.config_mode,
            connection: data.connection,
            authentication: data.authentication,
            capabilities: data.capabilities,
            synchronization: data.synchronization,
            connection_verified: data.connection_verified,
            negotiated_at: clock.utc(),
        }
    }

    /// Returns the negotiation identifier.
    #[must_use]
    pub const fn negotiation_id(&self) -> NegotiationId {
        self.negotiation_id
    }

    /// Returns the agent type the negotiation ran for.
    #[must_use]
    pub const fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Returns the protocol the negotiation ran for.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the timeout budget that governed the attempt.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configuration mode that governed connection resolution.
    #[must_use]
    pub const fn config_mode(&self) -> ConfigMode {
        self.config_mode
    }

    /// Returns the resolved connection endpoint.
    #[must_use]
    pub const fn connection(&self) -> &ConnectionDescriptor {
        &self.connection
    }

    /// Returns the collected authentication material.
    #[must_use]
    pub const fn authentication(&self) -> &AuthenticationDescriptor {
        &self.authentication
    }

    /// Returns the collected capability metadata.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns the agreed synchronization policy.
    #[must_use]
    pub const fn synchronization(&self) -> &SynchronizationPolicy {
        &self.synchronization
    }

    /// Returns whether the health check against the resolved endpoint
    /// succeeded within the timeout budget.
    #[must_use]
    pub const fn connection_verified(&self) -> bool {
        self.connection_verified
    }

    /// Returns when the negotiation completed.
    #[must_use]
    pub const fn negotiated_at(&self) -> DateTime<Utc> {
        self.negotiated_at
    }
}
