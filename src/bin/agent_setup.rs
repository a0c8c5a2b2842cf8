//! Negotiates communication with an external agent from the command line.
//!
//! Usage:
//!
//! ```text
//! agent-setup --agent <internal|external|hybrid> [--protocol <http|websocket|grpc>]
//!             [--timeout <secs>] [--config <auto|manual|custom>]
//!             [--url <url>] [--output <path>]
//! ```
//!
//! Runs one negotiation and writes the resulting configuration document to
//! `--output` when given, otherwise to standard output. Subsystem soft
//! failures (unreachable registries, failed probes, unhealthy endpoints)
//! never abort; they surface as empty or false fields in the document. A
//! missing `--url` in `manual` or `custom` mode is a configuration error
//! and exits non-zero.

use entente::negotiation::adapters::HttpCapabilityProber;
use entente::negotiation::domain::{
    AgentType, AgentUrl, ConfigMode, NegotiationResult, Protocol,
};
use entente::negotiation::services::{
    DiscoveryChain, NegotiationRequest, NegotiationService, NegotiationServiceError,
};
use mockable::DefaultClock;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while driving a negotiation from the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to initialise the negotiation stack: {0}")]
    StackInit(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Configuration(#[from] NegotiationServiceError),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write configuration: {0}")]
    OutputWrite(#[source] std::io::Error),
}

/// Parsed command-line options.
struct CliOptions {
    agent_type: AgentType,
    protocol: Protocol,
    timeout: Duration,
    config_mode: ConfigMode,
    override_url: Option<AgentUrl>,
    output: Option<PathBuf>,
}

/// Mutable accumulator while flags are consumed.
struct PendingOptions {
    agent_type: Option<AgentType>,
    protocol: Protocol,
    timeout_secs: u64,
    config_mode: ConfigMode,
    override_url: Option<AgentUrl>,
    output: Option<PathBuf>,
}

impl PendingOptions {
    const fn new() -> Self {
        Self {
            agent_type: None,
            protocol: Protocol::Http,
            timeout_secs: 30,
            config_mode: ConfigMode::Auto,
            override_url: None,
            output: None,
        }
    }

    fn apply(&mut self, flag: &str, value: String) -> Result<(), CliError> {
        match flag {
            "--agent" => {
                self.agent_type = Some(parse_flag_value(flag, &value, |s| AgentType::try_from(s))?);
            }
            "--protocol" => {
                self.protocol = parse_flag_value(flag, &value, |s| Protocol::try_from(s))?;
            }
            "--timeout" => {
                self.timeout_secs = value.parse().map_err(|err| {
                    CliError::InvalidArgs(format!("invalid --timeout value '{value}': {err}"))
                })?;
            }
            "--config" => {
                self.config_mode = parse_flag_value(flag, &value, |s| ConfigMode::try_from(s))?;
            }
            "--url" => {
                self.override_url = Some(AgentUrl::new(value).map_err(|err| {
                    CliError::InvalidArgs(format!("invalid --url value: {err}"))
                })?);
            }
            "--output" => {
                self.output = Some(PathBuf::from(value));
            }
            other => {
                return Err(CliError::InvalidArgs(format!("unknown argument '{other}'")));
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<CliOptions, CliError> {
        let agent_type = self
            .agent_type
            .ok_or_else(|| CliError::InvalidArgs("missing required --agent".to_owned()))?;
        Ok(CliOptions {
            agent_type,
            protocol: self.protocol,
            timeout: Duration::from_secs(self.timeout_secs),
            config_mode: self.config_mode,
            override_url: self.override_url,
            output: self.output,
        })
    }
}

fn parse_flag_value<T, E>(
    flag: &str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, CliError>
where
    E: std::fmt::Display,
{
    parse(value).map_err(|err| CliError::InvalidArgs(format!("invalid {flag} value: {err}")))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions, CliError> {
    let _program = args.next();
    let mut pending = PendingOptions::new();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| CliError::InvalidArgs(format!("missing value for {flag}")))?;
        pending.apply(&flag, value)?;
    }
    pending.finish()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn run_negotiation(options: &CliOptions) -> Result<NegotiationResult, CliError> {
    let chain = DiscoveryChain::standard().map_err(|err| CliError::StackInit(err.to_string()))?;
    let prober = HttpCapabilityProber::new().map_err(|err| CliError::StackInit(err.to_string()))?;
    let service = NegotiationService::new(Arc::new(chain), Arc::new(prober), Arc::new(DefaultClock));

    let mut request = NegotiationRequest::new(
        options.agent_type,
        options.protocol,
        options.timeout,
        options.config_mode,
    );
    if let Some(url) = &options.override_url {
        request = request.with_override_url(url.clone());
    }

    let result = service.negotiate(request).await?;
    if result.connection_verified() {
        info!("external agent connection verified");
    } else {
        warn!("external agent connection could not be verified");
    }
    Ok(result)
}

fn emit(result: &NegotiationResult, output: Option<&Path>) -> Result<(), CliError> {
    let document = serde_json::to_string_pretty(result).map_err(CliError::Serialize)?;
    if let Some(path) = output {
        std::fs::write(path, document).map_err(CliError::OutputWrite)?;
        info!(path = %path.display(), "configuration saved");
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .map_err(CliError::OutputWrite)?;
    stdout.write_all(b"\n").map_err(CliError::OutputWrite)?;
    Ok(())
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let options = parse_args(env::args())?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let result = runtime.block_on(run_negotiation(&options))?;
    emit(&result, options.output.as_deref())?;
    Ok(())
}
