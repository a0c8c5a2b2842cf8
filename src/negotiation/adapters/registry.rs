//! Service registry discovery over HTTP.

use crate::negotiation::domain::{
    AgentUrl, AuthenticationDescriptor, CapabilitySet, DiscoverySource,
};
use crate::negotiation::ports::{
    DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy, DiscoveryStrategyError,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Well-known local service registry endpoints, queried in order.
const REGISTRY_ENDPOINTS: [&str; 3] = [
    "http://localhost:8080/registry",
    "http://localhost:8500/v1/agent",
    "http://localhost:2379/v2/keys/agent",
];

/// Agent record shape returned by a cooperating registry.
#[derive(Debug, Clone, Deserialize)]
struct RegistryAgentRecord {
    url: Option<String>,
    token: Option<Value>,
    #[serde(default)]
    capabilities: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RegistryResponse {
    agent: Option<RegistryAgentRecord>,
}

/// Locates an agent by querying well-known local service registries.
///
/// Endpoints are best-effort and optional: unreachable or malformed
/// registries are skipped silently and the next endpoint is tried. The
/// first well-formed agent record wins.
#[derive(Debug, Clone)]
pub struct RegistryDiscovery {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl RegistryDiscovery {
    /// Creates a registry discovery strategy over the well-known endpoint
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryStrategyError::Lookup`] when the HTTP client
    /// cannot be initialised.
    pub fn new() -> DiscoveryResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(DiscoveryStrategyError::lookup)?;
        Ok(Self {
            client,
            endpoints: REGISTRY_ENDPOINTS
                .iter()
                .map(|endpoint| (*endpoint).to_owned())
                .collect(),
        })
    }

    /// Replaces the registry endpoint list.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = String>) -> Self {
        self.endpoints = endpoints.into_iter().collect();
        self
    }

    async fn query_endpoint(
        &self,
        endpoint: &str,
        timeout: Duration,
    ) -> DiscoveryResult<Option<DiscoveryFinding>> {
        let response = self
            .client
            .get(endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(DiscoveryStrategyError::lookup)?;
        if !response.status().is_success() {
            return Ok(None);
        }
        let payload: RegistryResponse =
            response
                .json()
                .await
                .map_err(|err| DiscoveryStrategyError::MalformedResponse {
                    origin: DiscoverySource::Registry,
                    reason: err.to_string(),
                })?;
        Ok(payload.agent.and_then(finding_from_record))
    }
}

#[async_trait]
impl DiscoveryStrategy for RegistryDiscovery {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::Registry
    }

    async fn attempt(
        &self,
        context: &DiscoveryContext,
    ) -> DiscoveryResult<Option<DiscoveryFinding>> {
        for endpoint in &self.endpoints {
            match self.query_endpoint(endpoint, context.timeout()).await {
                Ok(Some(finding)) => {
                    info!(endpoint = %endpoint, "agent located via service registry");
                    return Ok(Some(finding));
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(endpoint = %endpoint, error = %err, "registry endpoint skipped");
                }
            }
        }
        Ok(None)
    }
}

/// Converts a registry agent record into a finding.
///
/// Records without a usable URL are treated as misses so the next endpoint
/// gets its turn.
fn finding_from_record(record: RegistryAgentRecord) -> Option<DiscoveryFinding> {
    let url = AgentUrl::new(record.url?).ok()?;
    let authentication = record
        .token
        .filter(|token| !token.is_null())
        .map_or_else(AuthenticationDescriptor::new, |token| {
            AuthenticationDescriptor::from_entries([("token".to_owned(), token)])
        });
    Some(DiscoveryFinding {
        url,
        authentication,
        capabilities: CapabilitySet::from_entries(record.capabilities),
    })
}
