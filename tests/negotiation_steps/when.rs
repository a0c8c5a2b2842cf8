//! When steps for negotiation BDD scenarios.

use super::world::NegotiationWorld;
use entente::negotiation::domain::ConfigMode;
use rstest_bdd_macros::when;

#[when("an auto negotiation runs without an override URL")]
fn auto_negotiation(world: &mut NegotiationWorld) {
    world.negotiate(ConfigMode::Auto, None);
}

#[when("a manual negotiation runs without an override URL")]
fn manual_negotiation_without_url(world: &mut NegotiationWorld) {
    world.negotiate(ConfigMode::Manual, None);
}

#[when(r#"a manual negotiation runs with override URL "{url}""#)]
fn manual_negotiation_with_url(world: &mut NegotiationWorld, url: String) {
    world.negotiate(ConfigMode::Manual, Some(&url));
}
