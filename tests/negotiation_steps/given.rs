//! Given steps for negotiation BDD scenarios.

use super::world::{NegotiationWorld, ScriptedProber, ScriptedStrategy};
use entente::negotiation::domain::DiscoverySource;
use rstest_bdd_macros::given;
use std::sync::Arc;

#[given("a discovery chain where every strategy misses")]
fn chain_of_misses(world: &mut NegotiationWorld) {
    world.strategies = vec![
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Registry)),
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Broadcast)),
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Environment)),
    ];
}

#[given(r#"a discovery chain where the registry strategy finds "{url}""#)]
fn registry_finds(world: &mut NegotiationWorld, url: String) {
    world.strategies = vec![
        Arc::new(ScriptedStrategy::finds(DiscoverySource::Registry, &url)),
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Broadcast)),
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Environment)),
    ];
}

#[given(r#"a discovery chain where the environment strategy finds "{url}""#)]
fn environment_finds(world: &mut NegotiationWorld, url: String) {
    world.strategies = vec![
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Registry)),
        Arc::new(ScriptedStrategy::misses(DiscoverySource::Broadcast)),
        Arc::new(ScriptedStrategy::finds(DiscoverySource::Environment, &url)),
    ];
}

#[given("a healthy endpoint")]
fn healthy_endpoint(world: &mut NegotiationWorld) {
    world.prober = ScriptedProber::healthy();
}

#[given("an unreachable endpoint")]
fn unreachable_endpoint(world: &mut NegotiationWorld) {
    world.prober = ScriptedProber::unreachable();
}

#[given("an endpoint whose capability document is malformed")]
fn malformed_endpoint(world: &mut NegotiationWorld) {
    world.prober = ScriptedProber::malformed_document();
}
