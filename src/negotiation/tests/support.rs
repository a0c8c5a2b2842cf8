//! Scripted discovery strategies shared by the negotiation unit tests.

use crate::negotiation::domain::{AgentUrl, CapabilitySet, DiscoverySource};
use crate::negotiation::ports::{
    DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy, DiscoveryStrategyError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a scripted strategy does when attempted.
pub enum ScriptedBehaviour {
    /// Report the given finding.
    Find(DiscoveryFinding),
    /// Report not-found.
    Miss,
    /// Report an internal fault.
    Fail,
}

/// Discovery strategy double with a fixed behaviour and a call counter.
pub struct ScriptedStrategy {
    source: DiscoverySource,
    behaviour: ScriptedBehaviour,
    calls: AtomicUsize,
}

impl ScriptedStrategy {
    /// Creates a strategy that reports the given finding.
    pub const fn finds(source: DiscoverySource, finding: DiscoveryFinding) -> Self {
        Self {
            source,
            behaviour: ScriptedBehaviour::Find(finding),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a strategy that always reports not-found.
    pub const fn misses(source: DiscoverySource) -> Self {
        Self {
            source,
            behaviour: ScriptedBehaviour::Miss,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a strategy that always reports an internal fault.
    pub const fn fails(source: DiscoverySource) -> Self {
        Self {
            source,
            behaviour: ScriptedBehaviour::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns how many times the strategy was attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiscoveryStrategy for ScriptedStrategy {
    fn source(&self) -> DiscoverySource {
        self.source
    }

    async fn attempt(
        &self,
        _context: &DiscoveryContext,
    ) -> DiscoveryResult<Option<DiscoveryFinding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            ScriptedBehaviour::Find(finding) => Ok(Some(finding.clone())),
            ScriptedBehaviour::Miss => Ok(None),
            ScriptedBehaviour::Fail => Err(DiscoveryStrategyError::MalformedResponse {
                origin: self.source,
                reason: "scripted fault".to_owned(),
            }),
        }
    }
}

/// Builds a finding carrying only the given endpoint.
pub fn endpoint_finding(url: &str) -> DiscoveryFinding {
    DiscoveryFinding::endpoint_only(AgentUrl::new(url).expect("test url should be valid"))
}

/// Builds a finding carrying an endpoint plus capability entries.
pub fn finding_with_capabilities(
    url: &str,
    capabilities: impl IntoIterator<Item = (String, serde_json::Value)>,
) -> DiscoveryFinding {
    let mut finding = endpoint_finding(url);
    finding.capabilities = CapabilitySet::from_entries(capabilities);
    finding
}
