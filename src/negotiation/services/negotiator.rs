//! End-to-end negotiation orchestration.

use crate::negotiation::domain::{
    AgentType, AgentUrl, ConfigMode, NegotiationResult, NegotiationResultData, Protocol,
};
use crate::negotiation::ports::{CapabilityProber, DiscoveryContext, ProbeReport};
use crate::negotiation::services::{DiscoveryChain, DiscoveryOutcome, SynchronizationPolicyBuilder};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Caller inputs for one negotiation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationRequest {
    agent_type: AgentType,
    protocol: Protocol,
    timeout: Duration,
    config_mode: ConfigMode,
    override_url: Option<AgentUrl>,
}

impl NegotiationRequest {
    /// Creates a request without an override URL.
    #[must_use]
    pub const fn new(
        agent_type: AgentType,
        protocol: Protocol,
        timeout: Duration,
        config_mode: ConfigMode,
    ) -> Self {
        Self {
            agent_type,
            protocol,
            timeout,
            config_mode,
            override_url: None,
        }
    }

    /// Attaches a caller-supplied override URL.
    #[must_use]
    pub fn with_override_url(mut self, url: AgentUrl) -> Self {
        self.override_url = Some(url);
        self
    }

    /// Returns the agent type to negotiate for.
    #[must_use]
    pub const fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Returns the protocol to negotiate for.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the per-request timeout budget.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configuration mode.
    #[must_use]
    pub const fn config_mode(&self) -> ConfigMode {
        self.config_mode
    }

    /// Returns the override URL, if supplied.
    #[must_use]
    pub const fn override_url(&self) -> Option<&AgentUrl> {
        self.override_url.as_ref()
    }
}

/// Errors raised by the negotiation orchestrator.
///
/// Subsystem faults (unreachable registries, failed probes, unhealthy
/// endpoints) are soft failures reflected in the result's empty or false
/// fields; the orchestrator raises only for caller mistakes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NegotiationServiceError {
    /// A mode that bypasses discovery was invoked without an override URL.
    #[error("configuration mode '{0}' requires an override URL")]
    MissingOverrideUrl(ConfigMode),
}

/// Result type for negotiation orchestration.
pub type NegotiationServiceResult<T> = Result<T, NegotiationServiceError>;

/// Composes discovery, probing, health checking, and policy derivation
/// into one negotiation call.
///
/// Each call runs its steps sequentially, builds a fresh result from
/// scratch, and holds no state across calls.
#[derive(Clone)]
pub struct NegotiationService<P, C>
where
    P: CapabilityProber,
    C: Clock + Send + Sync,
{
    chain: Arc<DiscoveryChain>,
    prober: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> NegotiationService<P, C>
where
    P: CapabilityProber,
    C: Clock + Send + Sync,
{
    /// Creates a negotiation service.
    #[must_use]
    pub const fn new(chain: Arc<DiscoveryChain>, prober: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            chain,
            prober,
            clock,
        }
    }

    /// Runs one end-to-end negotiation.
    ///
    /// When no connection URL is established, probing and health checking
    /// are skipped and the result carries empty capability and
    /// authentication data with `connection_verified` false. That is a
    /// valid terminal state, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationServiceError::MissingOverrideUrl`] when the
    /// request uses `manual` or `custom` mode without an override URL.
    pub async fn negotiate(
        &self,
        request: NegotiationRequest,
    ) -> NegotiationServiceResult<NegotiationResult> {
        info!(
            agent_type = %request.agent_type(),
            protocol = %request.protocol(),
            config_mode = %request.config_mode(),
            "negotiating external agent connection"
        );

        let DiscoveryOutcome {
            connection,
            mut authentication,
            mut capabilities,
        } = self.resolve_connection(&request).await?;

        let mut connection_verified = false;
        if let Some(url) = connection.url().cloned() {
            let report = self.probe_capabilities(&url, &request).await;
            capabilities.merge(report.capabilities);
            authentication.merge(report.authentication);
            connection_verified = self.verify_connection(&url, &request).await;
        }
        if !connection.is_discovered() {
            debug!("no endpoint resolved; capability probe and health check skipped");
        }

        let synchronization =
            SynchronizationPolicyBuilder::build(request.agent_type(), request.protocol());

        let result = NegotiationResult::new(
            NegotiationResultData {
                agent_type: request.agent_type(),
                protocol: request.protocol(),
                timeout: request.timeout(),
                config_mode: request.config_mode(),
                connection,
                authentication,
                capabilities,
                synchronization,
                connection_verified,
            },
            &*self.clock,
        );
        info!(
            negotiation_id = %result.negotiation_id(),
            verified = result.connection_verified(),
            "negotiation complete"
        );
        Ok(result)
    }

    async fn resolve_connection(
        &self,
        request: &NegotiationRequest,
    ) -> NegotiationServiceResult<DiscoveryOutcome> {
        match request.config_mode() {
            ConfigMode::Auto => {
                let mut context = DiscoveryContext::new(request.timeout());
                if let Some(url) = request.override_url() {
                    context = context.with_override_url(url.clone());
                }
                Ok(self.chain.discover(&context).await)
            }
            mode @ (ConfigMode::Manual | ConfigMode::Custom) => {
                let url = request
                    .override_url()
                    .cloned()
                    .ok_or(NegotiationServiceError::MissingOverrideUrl(mode))?;
                info!(url = %url, mode = %mode, "discovery bypassed; using caller-supplied endpoint");
                Ok(DiscoveryOutcome::from_override(url))
            }
        }
    }

    async fn probe_capabilities(
        &self,
        url: &AgentUrl,
        request: &NegotiationRequest,
    ) -> ProbeReport {
        match self
            .prober
            .probe(url, request.protocol(), request.timeout())
            .await
        {
            Ok(report) => report,
            Err(err) => {
                warn!(url = %url, error = %err, "capability probe failed; continuing with empty capability data");
                ProbeReport::empty()
            }
        }
    }

    async fn verify_connection(&self, url: &AgentUrl, request: &NegotiationRequest) -> bool {
        match self
            .prober
            .health_check(url, request.protocol(), request.timeout())
            .await
        {
            Ok(healthy) => healthy,
            Err(err) => {
                warn!(url = %url, error = %err, "health check failed; connection remains unverified");
                false
            }
        }
    }
}
