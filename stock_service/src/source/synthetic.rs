//! Offline market data for the built-in catalog.
//!
//! Prices follow a small random walk: each daily close moves uniformly within
//! `[-1%, +1%]` of the previous one, starting from a per-symbol base price
//! derived from the ticker text. The walk is seeded from the symbol and the
//! current UTC day, so repeated fetches on one day see the same history.
//! Only catalog symbols are known.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stock_common::{Catalog, CatalogEntry, DashboardError, PricePoint, QuoteFields, Result};

use super::MarketDataSource;
use crate::config::Lookback;

/// Synthetic source used with `--offline`.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSource {
    catalog: Catalog,
}

impl SyntheticSource {
    /// Create a source serving the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
        }
    }

    /// Calculate the next price using a small random walk around `current_price`.
    ///
    /// The result is clamped to a minimum positive value.
    pub fn next_price(rng: &mut impl Rng, current_price: f64) -> f64 {
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_price = current_price * (1.0 + change);
        new_price.max(0.01)
    }
}

/// Stable per-symbol number used for base price and share count.
fn symbol_seed(symbol: &str) -> u64 {
    symbol
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

impl MarketDataSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str, lookback: &Lookback) -> Result<QuoteFields> {
        let (_, entry) = self
            .catalog
            .lookup(symbol)
            .ok_or_else(|| DashboardError::TickerNotFound(symbol.to_string()))?;

        Ok(walk(&entry, lookback, Utc::now()))
    }
}

/// Build the quote fields of `entry` as seen at `now`.
fn walk(entry: &CatalogEntry, lookback: &Lookback, now: DateTime<Utc>) -> QuoteFields {
    let seed = symbol_seed(entry.symbol);
    let day = now.timestamp().div_euclid(86_400) as u64;
    let mut rng = StdRng::seed_from_u64(seed ^ day);
    let mut price = 50.0 + (seed % 4_950) as f64;

    let days = lookback.days.max(2);
    let mut history = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        price = SyntheticSource::next_price(&mut rng, price);
        history.push(PricePoint {
            timestamp: now - Duration::days(i64::from(offset)),
            close: price,
        });
    }

    let previous_close = history[history.len() - 2].close;
    let open = SyntheticSource::next_price(&mut rng, previous_close);
    let high = open.max(price) * (1.0 + rng.random_range(0.0..0.005));
    let low = open.min(price) * (1.0 - rng.random_range(0.0..0.005));
    let volume = match entry.symbol {
        "AAPL" | "MSFT" | "TSLA" => 40_000_000 + rng.random_range(0..20_000_000),
        _ => 1_000_000 + rng.random_range(0..5_000_000),
    };
    let shares = 1e8 * (1 + seed % 150) as f64;

    QuoteFields {
        long_name: Some(entry.name.to_string()),
        short_name: None,
        current_price: Some(price),
        regular_market_price: None,
        open: Some(open),
        day_high: Some(high),
        day_low: Some(low),
        volume: Some(volume),
        previous_close: Some(previous_close),
        market_cap: Some(price * shares),
        history,
    }
}
