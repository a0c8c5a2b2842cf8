//! Error types for negotiation domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing negotiation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NegotiationDomainError {
    /// The agent URL is empty after trimming.
    #[error("agent URL must not be empty")]
    EmptyAgentUrl,

    /// The retry policy initial delay is zero.
    #[error("retry policy initial delay must be positive")]
    ZeroInitialDelay,
}

/// Error returned while parsing an agent type from caller input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent type: {0}")]
pub struct ParseAgentTypeError(pub String);

/// Error returned while parsing a protocol from caller input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown protocol: {0}")]
pub struct ParseProtocolError(pub String);

/// Error returned while parsing a configuration mode from caller input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown configuration mode: {0}")]
pub struct ParseConfigModeError(pub String);
