//! Configuration mode for connection resolution.

use super::ParseConfigModeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the connection endpoint is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigMode {
    /// Run the discovery chain, falling back to the override URL.
    Auto,
    /// Use the caller-supplied override URL directly; discovery is bypassed.
    Manual,
    /// Reserved for richer configuration sources; currently behaves as
    /// [`ConfigMode::Manual`].
    Custom,
}

impl ConfigMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Custom => "custom",
        }
    }

    /// Returns whether this mode requires a caller-supplied override URL.
    #[must_use]
    pub const fn requires_override_url(self) -> bool {
        matches!(self, Self::Manual | Self::Custom)
    }
}

impl fmt::Display for ConfigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ConfigMode {
    type Error = ParseConfigModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseConfigModeError(value.to_owned())),
        }
    }
}
