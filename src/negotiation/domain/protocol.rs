//! Communication protocol selection.

use super::ParseProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire protocol used to reach the remote agent.
///
/// Determines how the capability prober formats its queries. Only `http` is
/// fully probed in the base design; the other variants are declared so
/// callers can request them, and probing reports them as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Plain HTTP request/response.
    Http,
    /// WebSocket messaging.
    Websocket,
    /// gRPC calls.
    Grpc,
}

impl Protocol {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Websocket => "websocket",
            Self::Grpc => "grpc",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Protocol {
    type Error = ParseProtocolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "http" => Ok(Self::Http),
            "websocket" => Ok(Self::Websocket),
            "grpc" => Ok(Self::Grpc),
            _ => Err(ParseProtocolError(value.to_owned())),
        }
    }
}
