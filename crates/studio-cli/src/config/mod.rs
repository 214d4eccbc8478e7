//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig      # Host, port, shutdown
//! ├── recovery: RecoveryConfig  # Request timeout
//! └── service: ServiceConfig    # Session secret, bootstrap account
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use studio_server::middleware::RecoveryConfig;
use studio_server::service::ServiceConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "studio")]
#[command(about = "Studio portal account and role server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Request timeout configuration.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,

    /// Session keys and account bootstrap.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.recovery
            .validate()
            .context("invalid recovery configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration without sensitive values.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "build information"
        );

        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            bootstrap_ceo = self.service.bootstrap_ceo_email.is_some(),
            "service configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn parses_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "studio",
            "--port",
            "8080",
            "--request-timeout",
            "10",
            "--session-secret",
            SECRET,
        ])?;

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.recovery.request_timeout, 10);
        assert!(cli.validate().is_ok());
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_request_timeout() -> anyhow::Result<()> {
        for timeout in ["0", "100000"] {
            let cli = Cli::try_parse_from([
                "studio",
                "--request-timeout",
                timeout,
                "--session-secret",
                SECRET,
            ])?;
            assert!(cli.validate().is_err(), "timeout: {timeout}");
        }
        Ok(())
    }

    #[test]
    fn rejects_short_session_secret() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["studio", "--session-secret", "short"])?;
        assert!(cli.validate().is_err());
        Ok(())
    }
}
