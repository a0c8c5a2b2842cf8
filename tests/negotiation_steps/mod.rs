//! Step definitions for negotiation behaviour scenarios.

pub mod world;

mod given;
mod then;
mod when;
