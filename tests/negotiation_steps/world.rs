//! Shared world state for negotiation BDD scenarios.

use async_trait::async_trait;
use entente::negotiation::domain::{
    AgentType, AgentUrl, AuthenticationDescriptor, CapabilitySet, ConfigMode, DiscoverySource,
    NegotiationResult, Protocol,
};
use entente::negotiation::ports::{
    CapabilityProber, DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy,
    ProbeReport, ProbeResult, ProberError,
};
use entente::negotiation::services::{
    DiscoveryChain, NegotiationRequest, NegotiationService, NegotiationServiceError,
};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Discovery strategy double with a fixed behaviour and a call counter.
pub struct ScriptedStrategy {
    source: DiscoverySource,
    finding: Option<DiscoveryFinding>,
    calls: AtomicUsize,
}

impl ScriptedStrategy {
    /// Creates a strategy that always reports not-found.
    pub const fn misses(source: DiscoverySource) -> Self {
        Self {
            source,
            finding: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a strategy that reports an endpoint-only finding.
    pub fn finds(source: DiscoverySource, url: &str) -> Self {
        Self {
            source,
            finding: Some(DiscoveryFinding::endpoint_only(
                AgentUrl::new(url).expect("scenario url should be valid"),
            )),
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
        Ok(self.finding.clone())
    }
}

/// Capability prober double answering from scripted responses.
pub struct ScriptedProber {
    probe_response: ProbeResult<ProbeReport>,
    health_response: ProbeResult<bool>,
}

impl ScriptedProber {
    /// Creates a prober that learns nothing and reports the endpoint down.
    pub const fn inert() -> Self {
        Self {
            probe_response: Ok(ProbeReport::empty()),
            health_response: Ok(false),
        }
    }

    /// Creates a prober for a healthy endpoint with a capability document.
    pub fn healthy() -> Self {
        Self {
            probe_response: Ok(ProbeReport {
                capabilities: CapabilitySet::from_entries([("streaming".to_owned(), json!(true))]),
                authentication: AuthenticationDescriptor::from_entries([(
                    "token".to_owned(),
                    json!("scenario-token"),
                )]),
            }),
            health_response: Ok(true),
        }
    }

    /// Creates a prober for an endpoint that refuses every connection.
    pub fn unreachable() -> Self {
        Self {
            probe_response: Err(ProberError::transport(std::io::Error::other(
                "connection refused",
            ))),
            health_response: Err(ProberError::transport(std::io::Error::other(
                "connection refused",
            ))),
        }
    }

    /// Creates a prober whose capability document cannot be parsed but
    /// whose health endpoint answers.
    pub fn malformed_document() -> Self {
        Self {
            probe_response: Err(ProberError::MalformedResponse {
                url: "http://localhost:9000/api/v1/capabilities".to_owned(),
                reason: "expected value at line 1".to_owned(),
            }),
            health_response: Ok(true),
        }
    }
}

#[async_trait]
impl CapabilityProber for ScriptedProber {
    async fn probe(
        &self,
        _url: &AgentUrl,
        _protocol: Protocol,
        _timeout: Duration,
    ) -> ProbeResult<ProbeReport> {
        self.probe_response.clone()
    }

    async fn health_check(
        &self,
        _url: &AgentUrl,
        _protocol: Protocol,
        _timeout: Duration,
    ) -> ProbeResult<bool> {
        self.health_response.clone()
    }
}

/// Scenario world for negotiation behaviour tests.
pub struct NegotiationWorld {
    /// Strategy doubles wired into the discovery chain, in priority order.
    pub strategies: Vec<Arc<ScriptedStrategy>>,
    /// Prober double used for capability probing and health checking.
    pub prober: ScriptedProber,
    /// Outcome of the last negotiation.
    pub last_result: Option<Result<NegotiationResult, NegotiationServiceError>>,
}

impl NegotiationWorld {
    /// Creates a world with no strategies and an inert prober.
    pub const fn new() -> Self {
        Self {
            strategies: Vec::new(),
            prober: ScriptedProber::inert(),
            last_result: None,
        }
    }

    /// Runs a negotiation against the currently scripted chain and prober.
    pub fn negotiate(&mut self, config_mode: ConfigMode, override_url: Option<&str>) {
        let chain = DiscoveryChain::new(
            self.strategies
                .iter()
                .map(|strategy| strategy.clone() as Arc<dyn DiscoveryStrategy>)
                .collect(),
        );
        let prober = std::mem::replace(&mut self.prober, ScriptedProber::inert());
        let service =
            NegotiationService::new(Arc::new(chain), Arc::new(prober), Arc::new(DefaultClock));

        let mut request = NegotiationRequest::new(
            AgentType::External,
            Protocol::Http,
            Duration::from_secs(5),
            config_mode,
        );
        if let Some(url) = override_url {
            request =
                request.with_override_url(AgentUrl::new(url).expect("scenario url should be valid"));
        }

        self.last_result = Some(run_async(service.negotiate(request)));
    }

    /// Returns the last successful negotiation result.
    pub fn last_success(&self) -> Result<&NegotiationResult, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(result)) => Ok(result),
            Some(Err(err)) => Err(eyre::eyre!("negotiation failed unexpectedly: {err}")),
            None => Err(eyre::eyre!("no negotiation has run in this scenario")),
        }
    }
}

impl Default for NegotiationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NegotiationWorld {
    NegotiationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
