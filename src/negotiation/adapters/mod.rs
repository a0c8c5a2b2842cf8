//! Infrastructure adapters for agent discovery and probing.

mod broadcast;
mod environment;
mod http_prober;
mod registry;

pub use broadcast::BroadcastDiscovery;
pub use environment::EnvironmentDiscovery;
pub use http_prober::HttpCapabilityProber;
pub use registry::RegistryDiscovery;
