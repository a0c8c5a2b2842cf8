//! Ordered discovery chain with override fallback.

use crate::negotiation::adapters::{BroadcastDiscovery, EnvironmentDiscovery, RegistryDiscovery};
use crate::negotiation::domain::{
    AgentUrl, AuthenticationDescriptor, CapabilitySet, ConnectionDescriptor, DiscoverySource,
};
use crate::negotiation::ports::{
    DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy,
};
use mockable::DefaultEnv;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Connection endpoint plus the partial agent data discovery produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOutcome {
    /// Resolved connection endpoint.
    pub connection: ConnectionDescriptor,
    /// Authentication material reported during discovery.
    pub authentication: AuthenticationDescriptor,
    /// Capability metadata reported during discovery.
    pub capabilities: CapabilitySet,
}

impl DiscoveryOutcome {
    /// Creates the undiscovered terminal outcome.
    #[must_use]
    pub const fn undiscovered() -> Self {
        Self {
            connection: ConnectionDescriptor::undiscovered(),
            authentication: AuthenticationDescriptor::new(),
            capabilities: CapabilitySet::new(),
        }
    }

    /// Creates an outcome adopting the caller-supplied override URL.
    #[must_use]
    pub const fn from_override(url: AgentUrl) -> Self {
        Self {
            connection: ConnectionDescriptor::discovered(url, DiscoverySource::Override),
            authentication: AuthenticationDescriptor::new(),
            capabilities: CapabilitySet::new(),
        }
    }

    /// Creates an outcome from a successful strategy finding.
    #[must_use]
    pub fn from_finding(finding: DiscoveryFinding, source: DiscoverySource) -> Self {
        Self {
            connection: ConnectionDescriptor::discovered(finding.url, source),
            authentication: finding.authentication,
            capabilities: finding.capabilities,
        }
    }
}

impl Default for DiscoveryOutcome {
    fn default() -> Self {
        Self::undiscovered()
    }
}

/// Runs discovery strategies in a fixed priority order.
///
/// The chain short-circuits on the first strategy that locates an agent.
/// Strategy faults are soft failures: logged and skipped, never propagated.
/// When every strategy misses, a caller-supplied override URL (if any) is
/// adopted; otherwise the chain reports the undiscovered terminal state,
/// which callers must treat as "undiscovered", not as an error.
pub struct DiscoveryChain {
    strategies: Vec<Arc<dyn DiscoveryStrategy>>,
}

impl DiscoveryChain {
    /// Creates a chain over an explicit strategy order.
    #[must_use]
    pub const fn new(strategies: Vec<Arc<dyn DiscoveryStrategy>>) -> Self {
        Self { strategies }
    }

    /// Creates the standard chain: registry, then broadcast, then
    /// environment, reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::negotiation::ports::DiscoveryStrategyError`] when
    /// the registry HTTP client cannot be initialised.
    pub fn standard() -> DiscoveryResult<Self> {
        Ok(Self::new(vec![
            Arc::new(RegistryDiscovery::new()?),
            Arc::new(BroadcastDiscovery::new()),
            Arc::new(EnvironmentDiscovery::new(Arc::new(DefaultEnv))),
        ]))
    }

    /// Runs the strategies in order, falling back to the context's override
    /// URL when all of them miss.
    pub async fn discover(&self, context: &DiscoveryContext) -> DiscoveryOutcome {
        for strategy in &self.strategies {
            let source = strategy.source();
            match strategy.attempt(context).await {
                Ok(Some(finding)) => {
                    info!(source = %source, url = %finding.url, "agent discovered");
                    return DiscoveryOutcome::from_finding(finding, source);
                }
                Ok(None) => {
                    debug!(source = %source, "discovery strategy reported not-found");
                }
                Err(err) => {
                    warn!(source = %source, error = %err, "discovery strategy failed; continuing");
                }
            }
        }

        context.override_url().cloned().map_or_else(
            || {
                debug!("discovery exhausted with no override URL; agent remains undiscovered");
                DiscoveryOutcome::undiscovered()
            },
            |url| {
                info!(url = %url, "discovery exhausted; adopting caller-supplied override URL");
                DiscoveryOutcome::from_override(url)
            },
        )
    }
}
