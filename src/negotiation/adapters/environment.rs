//! Environment variable discovery.

use crate::negotiation::domain::{AgentUrl, DiscoverySource};
use crate::negotiation::ports::{
    DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy,
};
use async_trait::async_trait;
use mockable::Env;
use std::sync::Arc;
use tracing::info;

/// Well-known environment variables naming an agent gateway URL or
/// host/port pair, checked in order.
const DISCOVERY_ENV_VARS: [&str; 5] = [
    "EXTERNAL_AGENT_URL",
    "AGENT_GATEWAY_URL",
    "ENTENTE_GATEWAY_URL",
    "AGENT_HOST",
    "AGENT_PORT",
];

/// Locates an agent endpoint from well-known environment variables.
///
/// The first non-empty value wins and is adopted verbatim. No URL
/// validation happens at this stage, as the value may be a bare host or
/// port rather than a full URL.
#[derive(Debug, Clone)]
pub struct EnvironmentDiscovery<E> {
    env: Arc<E>,
    variables: Vec<String>,
}

impl<E> EnvironmentDiscovery<E>
where
    E: Env + Send + Sync,
{
    /// Creates an environment discovery strategy over the well-known
    /// variable list.
    #[must_use]
    pub fn new(env: Arc<E>) -> Self {
        Self {
            env,
            variables: DISCOVERY_ENV_VARS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    /// Replaces the variable list.
    #[must_use]
    pub fn with_variables(mut self, variables: impl IntoIterator<Item = String>) -> Self {
        self.variables = variables.into_iter().collect();
        self
    }
}

#[async_trait]
impl<E> DiscoveryStrategy for EnvironmentDiscovery<E>
where
    E: Env + Send + Sync,
{
    fn source(&self) -> DiscoverySource {
        DiscoverySource::Environment
    }

    async fn attempt(
        &self,
        _context: &DiscoveryContext,
    ) -> DiscoveryResult<Option<DiscoveryFinding>> {
        for name in &self.variables {
            let Some(value) = self.env.string(name) else {
                continue;
            };
            // Empty values are treated as unset.
            let Ok(url) = AgentUrl::new(value) else {
                continue;
            };
            info!(variable = %name, "agent endpoint taken from environment");
            return Ok(Some(DiscoveryFinding::endpoint_only(url)));
        }
        Ok(None)
    }
}
