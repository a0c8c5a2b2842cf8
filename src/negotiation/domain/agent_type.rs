//! Agent type classification.

use super::ParseAgentTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment relationship between the local system and the remote agent.
///
/// Set once at orchestration start and recorded unchanged into the
/// negotiated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// The agent runs inside the local trust boundary.
    Internal,
    /// The agent runs outside the local trust boundary.
    External,
    /// The agent spans both sides of the trust boundary.
    Hybrid,
}

impl AgentType {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentType {
    type Error = ParseAgentTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ParseAgentTypeError(value.to_owned())),
        }
    }
}
