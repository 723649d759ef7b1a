//! Market data sources behind the quote cache.
//!
//! A source answers a single question: the current quote fields plus the
//! trailing price history of one ticker. It is an opaque, fallible
//! dependency; the cache decides what its errors mean.
//! - `yahoo`: Yahoo Finance chart API over blocking HTTP.
//! - `synthetic`: offline random-walk data for the built-in catalog.

pub mod synthetic;
pub mod yahoo;

use log::info;
use stock_common::{QuoteFields, Result};

use crate::config::{DashboardConfig, Lookback};

pub use synthetic::SyntheticSource;
pub use yahoo::YahooSource;

/// Fetches quote fields and trailing history for a symbol.
pub trait MarketDataSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the quote of `symbol` with `lookback` worth of daily closes.
    fn fetch(&self, symbol: &str, lookback: &Lookback) -> Result<QuoteFields>;
}

/// Build the source selected by `config`.
pub fn from_config(config: &DashboardConfig) -> Result<Box<dyn MarketDataSource>> {
    if config.offline {
        info!("Using synthetic market data (offline mode)");
        return Ok(Box::new(SyntheticSource::new()));
    }
    info!("Using market data from {}", config.api_base);
    let source = YahooSource::new(&config.api_base, config.timeout, &config.user_agent)?;
    Ok(Box::new(source))
}
