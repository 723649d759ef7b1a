//! Runtime configuration of the quote service.

use std::time::Duration;

use stock_common::endpoints::{
    LOOKBACK_DAYS, LOOKBACK_INTERVAL, LOOKBACK_RANGE, USER_AGENT, YAHOO_API_BASE,
};

/// Default time-to-live of a cached quote or failure.
pub const DEFAULT_TTL_SECS: u64 = 30;
/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Trailing history window requested from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    /// Range parameter understood by the upstream API (e.g. `1mo`).
    pub range: &'static str,
    /// Bar interval (e.g. `1d`).
    pub interval: &'static str,
    /// Window length in days, used by sources that generate bars themselves.
    pub days: u32,
}

impl Default for Lookback {
    fn default() -> Self {
        Self {
            range: LOOKBACK_RANGE,
            interval: LOOKBACK_INTERVAL,
            days: LOOKBACK_DAYS,
        }
    }
}

/// Settings for building a [`crate::Dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Maximum age of a cache entry.
    pub ttl: Duration,
    /// History window fetched with every quote.
    pub lookback: Lookback,
    /// Base URL of the upstream API.
    pub api_base: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// User agent sent upstream.
    pub user_agent: String,
    /// Use the synthetic source instead of the network.
    pub offline: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            lookback: Lookback::default(),
            api_base: YAHOO_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            offline: false,
        }
    }
}
