//! HTTP capability prober.

use crate::negotiation::domain::{
    AgentUrl, AuthenticationDescriptor, CapabilitySet, Protocol,
};
use crate::negotiation::ports::{CapabilityProber, ProbeReport, ProbeResult, ProberError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Fixed capability-query path, resolved relative to the negotiated URL.
const CAPABILITIES_PATH: &str = "/api/v1/capabilities";

/// Fixed health-check path, resolved relative to the negotiated URL.
const HEALTH_PATH: &str = "/health";

/// Capability document shape served by a cooperating agent.
#[derive(Debug, Clone, Deserialize)]
struct CapabilityDocument {
    #[serde(default)]
    capabilities: BTreeMap<String, Value>,
    #[serde(default)]
    authentication: BTreeMap<String, Value>,
}

/// Probes agents over plain HTTP.
///
/// Only the `http` protocol is implemented; `websocket` and `grpc` probes
/// report [`ProberError::UnsupportedProtocol`] so the orchestrator records
/// them as permanently unverified rather than failing.
#[derive(Debug, Clone)]
pub struct HttpCapabilityProber {
    client: reqwest::Client,
}

impl HttpCapabilityProber {
    /// Creates an HTTP prober.
    ///
    /// # Errors
    ///
    /// Returns [`ProberError::Transport`] when the HTTP client cannot be
    /// initialised.
    pub fn new() -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ProberError::transport)?;
        Ok(Self { client })
    }

    /// Joins a fixed relative path onto the negotiated base URL.
    fn endpoint(base: &AgentUrl, path: &str) -> String {
        format!("{}{path}", base.as_str().trim_end_matches('/'))
    }

    async fn probe_http(&self, url: &AgentUrl, timeout: Duration) -> ProbeResult<ProbeReport> {
        let endpoint = Self::endpoint(url, CAPABILITIES_PATH);
        let response = self
            .client
            .get(&endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(ProberError::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProberError::UnexpectedStatus {
                url: endpoint,
                status: status.as_u16(),
            });
        }
        let document: CapabilityDocument =
            response
                .json()
                .await
                .map_err(|err| ProberError::MalformedResponse {
                    url: endpoint,
                    reason: err.to_string(),
                })?;
        debug!(
            url = %url,
            capabilities = document.capabilities.len(),
            "capability document retrieved"
        );
        Ok(ProbeReport {
            capabilities: CapabilitySet::from_entries(document.capabilities),
            authentication: AuthenticationDescriptor::from_entries(document.authentication),
        })
    }

    async fn health_http(&self, url: &AgentUrl, timeout: Duration) -> ProbeResult<bool> {
        let endpoint = Self::endpoint(url, HEALTH_PATH);
        let response = self
            .client
            .get(&endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(ProberError::transport)?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl CapabilityProber for HttpCapabilityProber {
    async fn probe(
        &self,
        url: &AgentUrl,
        protocol: Protocol,
        timeout: Duration,
    ) -> ProbeResult<ProbeReport> {
        match protocol {
            Protocol::Http => self.probe_http(url, timeout).await,
            Protocol::Websocket | Protocol::Grpc => {
                Err(ProberError::UnsupportedProtocol(protocol))
            }
        }
    }

    async fn health_check(
        &self,
        url: &AgentUrl,
        protocol: Protocol,
        timeout: Duration,
    ) -> ProbeResult<bool> {
        match protocol {
            Protocol::Http => self.health_http(url, timeout).await,
            Protocol::Websocket | Protocol::Grpc => {
                Err(ProberError::UnsupportedProtocol(protocol))
            }
        }
    }
}
