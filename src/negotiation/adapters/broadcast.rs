//! Local-network broadcast discovery stub.

use crate::negotiation::domain::DiscoverySource;
use crate::negotiation::ports::{
    DiscoveryContext, DiscoveryFinding, DiscoveryResult, DiscoveryStrategy,
};
use async_trait::async_trait;

/// Broadcast discovery extension point.
///
/// No broadcast is performed in the base design: every attempt reports
/// not-found. The always-miss behaviour is deliberate and preserved so the
/// chain's priority order stays observable; a real implementation would
/// send UDP probes on the local network.
#[derive(Debug, Clone, Copy, Default)]
pub struct BroadcastDiscovery;

impl BroadcastDiscovery {
    /// Creates the broadcast discovery stub.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DiscoveryStrategy for BroadcastDiscovery {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::Broadcast
    }

    async fn attempt(
        &self,
        _context: &DiscoveryContext,
    ) -> DiscoveryResult<Option<DiscoveryFinding>> {
        Ok(None)
    }
}
