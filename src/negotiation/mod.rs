//! External agent discovery and connection negotiation.
//!
//! Locates a remote agent endpoint through an ordered chain of discovery
//! strategies, probes it for capabilities and authentication parameters,
//! verifies reachability, and derives the synchronization policy for
//! ongoing communication. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
