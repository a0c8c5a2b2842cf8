//! Orchestration services for external agent negotiation.

mod chain;
mod negotiator;
mod policy;

pub use chain::{DiscoveryChain, DiscoveryOutcome};
pub use negotiator::{
    NegotiationRequest, NegotiationService, NegotiationServiceError, NegotiationServiceResult,
};
pub use policy::SynchronizationPolicyBuilder;
