//! Synchronization policy value objects.

use super::{AgentType, Protocol, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How state changes propagate between the local and remote agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMethod {
    /// Changes are pushed as they occur.
    RealTime,
    /// Changes are accumulated and exchanged in batches.
    Batch,
}

impl SyncMethod {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RealTime => "real_time",
            Self::Batch => "batch",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cadence of synchronization exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFrequency {
    /// Exchanges run continuously while the connection is live.
    Continuous,
    /// Exchanges run only when a party requests one.
    OnDemand,
}

impl SyncFrequency {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::OnDemand => "on_demand",
        }
    }
}

impl fmt::Display for SyncFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consistency guarantee agreed for synchronized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    /// Both sides observe the same state before an exchange completes.
    Strong,
    /// Divergence is tolerated and reconciled later.
    Eventual,
}

impl ConsistencyLevel {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Eventual => "eventual",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialization format for synchronization messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// JSON documents.
    Json,
}

impl MessageFormat {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agreed cadence, consistency, and retry behaviour for ongoing
/// communication with the remote agent.
///
/// The agent type and protocol are recorded for downstream consumers; they
/// do not currently alter the remaining fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationPolicy {
    method: SyncMethod,
    frequency: SyncFrequency,
    consistency: ConsistencyLevel,
    mode: AgentType,
    protocol: Protocol,
    message_format: MessageFormat,
    retry_policy: RetryPolicy,
}

/// Parameter object for constructing a synchronization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynchronizationPolicyData {
    /// Propagation method.
    pub method: SyncMethod,
    /// Exchange cadence.
    pub frequency: SyncFrequency,
    /// Consistency guarantee.
    pub consistency: ConsistencyLevel,
    /// Agent type the policy was negotiated for.
    pub mode: AgentType,
    /// Protocol the policy was negotiated for.
    pub protocol: Protocol,
    /// Message serialization format.
    pub message_format: MessageFormat,
    /// Retry behaviour.
    pub retry_policy: RetryPolicy,
}

impl SynchronizationPolicy {
    /// Creates a policy from explicit settings.
    #[must_use]
    pub const fn new(data: SynchronizationPolicyData) -> Self {
        Self {
            method: data.method,
            frequency: data.frequency,
            consistency: data.consistency,
            mode: data.mode,
            protocol: data.protocol,
            message_format: data.message_format,
            retry_policy: data.retry_policy,
        }
    }

    /// Returns the propagation method.
    #[must_use]
    pub const fn method(&self) -> SyncMethod {
        self.method
    }

    /// Returns the exchange cadence.
    #[must_use]
    pub const fn frequency(&self) -> SyncFrequency {
        self.frequency
    }

    /// Returns the consistency guarantee.
    #[must_use]
    pub const fn consistency(&self) -> ConsistencyLevel {
        self.consistency
    }

    /// Returns the agent type the policy was negotiated for.
    #[must_use]
    pub const fn mode(&self) -> AgentType {
        self.mode
    }

    /// Returns the protocol the policy was negotiated for.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the message serialization format.
    #[must_use]
    pub const fn message_format(&self) -> MessageFormat {
        self.message_format
    }

    /// Returns the retry behaviour.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }
}
