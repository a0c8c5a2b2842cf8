//! Then steps for negotiation BDD scenarios.

use super::world::NegotiationWorld;
use entente::negotiation::domain::{AgentUrl, DiscoverySource, SyncMethod};
use entente::negotiation::services::NegotiationServiceError;
use rstest_bdd_macros::then;

#[then("the result has no connection URL")]
fn no_connection_url(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if result.connection().is_discovered() {
        return Err(eyre::eyre!(
            "expected an undiscovered connection, got {:?}",
            result.connection()
        ));
    }
    Ok(())
}

#[then("the connection is verified")]
fn connection_is_verified(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if !result.connection_verified() {
        return Err(eyre::eyre!("expected the connection to be verified"));
    }
    Ok(())
}

#[then("the connection is not verified")]
fn connection_is_not_verified(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if result.connection_verified() {
        return Err(eyre::eyre!("expected the connection to remain unverified"));
    }
    Ok(())
}

#[then(r#"the connection URL is "{url}""#)]
fn connection_url_is(world: &NegotiationWorld, url: String) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    let actual = result.connection().url().map(AgentUrl::as_str);
    if actual != Some(url.as_str()) {
        return Err(eyre::eyre!("expected connection URL {url}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the connection was discovered via "{source}""#)]
fn discovered_via(world: &NegotiationWorld, source: String) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    let actual = result
        .connection()
        .discovered_via()
        .map(DiscoverySource::as_str);
    if actual != Some(source.as_str()) {
        return Err(eyre::eyre!(
            "expected discovery source {source}, got {actual:?}"
        ));
    }
    Ok(())
}

#[then("the strategies after the registry were never attempted")]
fn later_strategies_not_attempted(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    for strategy in world.strategies.iter().skip(1) {
        if strategy.calls() != 0 {
            return Err(eyre::eyre!(
                "expected strategy after the registry to be skipped, saw {} attempts",
                strategy.calls()
            ));
        }
    }
    Ok(())
}

#[then("no discovery strategy was attempted")]
fn no_strategy_attempted(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    for strategy in &world.strategies {
        if strategy.calls() != 0 {
            return Err(eyre::eyre!("expected discovery to be bypassed entirely"));
        }
    }
    Ok(())
}

#[then("negotiation fails with a missing override URL error")]
fn fails_with_missing_override(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(NegotiationServiceError::MissingOverrideUrl(_))) => Ok(()),
        Some(other) => Err(eyre::eyre!(
            "expected a missing override URL error, got {other:?}"
        )),
        None => Err(eyre::eyre!("no negotiation has run in this scenario")),
    }
}

#[then("the capability set is empty")]
fn capability_set_is_empty(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if !result.capabilities().is_empty() {
        return Err(eyre::eyre!("expected an empty capability set"));
    }
    Ok(())
}

#[then("a synchronization policy was agreed")]
fn synchronization_policy_agreed(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if result.synchronization().method() != SyncMethod::RealTime {
        return Err(eyre::eyre!("expected the default real-time policy"));
    }
    Ok(())
}
