//! Command-line arguments for the stock dashboard client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::time::Duration;

use clap::Parser;
use stock_common::Market;
use stock_common::endpoints::YAHOO_API_BASE;
use stock_service::DashboardConfig;
use stock_service::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_TTL_SECS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Market selected after login.
    #[clap(long, value_enum, default_value_t = Market::IndianNse)]
    pub market: Market,

    /// Seconds a fetched quote (or failure) is served from the cache.
    #[clap(long, default_value_t = DEFAULT_TTL_SECS)]
    pub ttl_secs: u64,

    /// Serve synthetic prices for catalog symbols instead of calling the API.
    #[clap(long)]
    pub offline: bool,

    /// Base URL of the market-data API.
    #[clap(long, default_value = YAHOO_API_BASE)]
    pub api_base: String,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log in with this username instead of prompting.
    #[clap(long, requires = "password")]
    pub username: Option<String>,

    /// Password for `--username`.
    #[clap(long, requires = "username")]
    pub password: Option<String>,

    /// Print quotes as JSON instead of cards.
    #[clap(long)]
    pub json: bool,
}

impl Args {
    /// Service configuration derived from the flags.
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            ttl: Duration::from_secs(self.ttl_secs),
            api_base: self.api_base.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            offline: self.offline,
            ..DashboardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_defaults() {
        let args = Args::parse_from(["stock_client"]);
        assert_eq!(args.market, Market::IndianNse);

        let config = args.to_config();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.api_base, YAHOO_API_BASE);
        assert!(!config.offline);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "stock_client",
            "--market",
            "us",
            "--ttl-secs",
            "5",
            "--offline",
            "--username",
            "admin",
            "--password",
            "password123",
        ]);
        assert_eq!(args.market, Market::Us);
        assert_eq!(args.username.as_deref(), Some("admin"));
        assert_eq!(args.password.as_deref(), Some("password123"));

        let config = args.to_config();
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert!(config.offline);
    }

    #[test]
    fn credentials_must_be_given_together() {
        let err = Args::try_parse_from(["stock_client", "--username", "admin"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        assert!(Args::try_parse_from(["stock_client", "--password", "password123"]).is_err());
    }
}
