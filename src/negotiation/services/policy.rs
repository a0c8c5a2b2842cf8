//! Synchronization policy derivation.

use crate::negotiation::domain::{
    AgentType, ConsistencyLevel, MessageFormat, Protocol, RetryPolicy, SyncFrequency, SyncMethod,
    SynchronizationPolicy, SynchronizationPolicyData,
};

/// Derives the synchronization policy for a negotiated connection.
///
/// Pure and infallible: identical inputs always produce structurally
/// identical policies. The agent type and protocol are recorded into the
/// policy but do not currently alter the defaults, which remains an open
/// parameterization point.
pub struct SynchronizationPolicyBuilder;

impl SynchronizationPolicyBuilder {
    /// Builds the policy for the given agent type and protocol.
    #[must_use]
    pub const fn build(agent_type: AgentType, protocol: Protocol) -> SynchronizationPolicy {
        SynchronizationPolicy::new(SynchronizationPolicyData {
            method: SyncMethod::RealTime,
            frequency: SyncFrequency::Continuous,
            consistency: ConsistencyLevel::Strong,
            mode: agent_type,
            protocol,
            message_format: MessageFormat::Json,
            retry_policy: RetryPolicy::standard(),
        })
    }
}
