//! Fixed-TTL quote cache.
//!
//! This module memoizes quote fetches per ticker symbol. It exposes these core
//! operations:
//!
//! - `QuoteCache::get(symbol)`: return the stored quote (or stored failure)
//!   while it is younger than the TTL, otherwise fetch from the source and
//!   replace the entry.
//! - `QuoteCache::clear()`: drop every entry regardless of age.
//! - `QuoteCache::evict_expired()`: drop entries older than the TTL and
//!   return their symbols.
//!
//! Failures are cached like quotes, so a failing symbol is not retried until
//! its entry expires or the cache is cleared. Nothing past `get` ever sees a
//! `DashboardError`; it is collapsed into a `FetchFailure`.
//!
//! The cache is not synchronized; if it is shared across threads, wrap it with
//! a synchronization primitive (e.g., `Mutex`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info, warn};
use stock_common::{DashboardError, FetchFailure, Quote};

use crate::clock::{Clock, SystemClock};
use crate::config::Lookback;
use crate::source::MarketDataSource;

/// Outcome stored for a symbol: the quote, or the failure standing in for it.
pub type QuoteOutcome = Result<Arc<Quote>, FetchFailure>;

struct CacheEntry {
    outcome: QuoteOutcome,
    fetched_at: Instant,
}

/// Memoizes quote fetches per symbol for a fixed time window.
pub struct QuoteCache {
    /// At most one entry per (normalized) symbol.
    entries: HashMap<String, CacheEntry>,
    /// Age from which an entry is no longer served.
    ttl: Duration,
    lookback: Lookback,
    source: Box<dyn MarketDataSource>,
    clock: Box<dyn Clock>,
}

impl QuoteCache {
    /// Create a cache over `source` using the system clock.
    pub fn new(source: Box<dyn MarketDataSource>, ttl: Duration) -> Self {
        Self::with_clock(source, Box::new(SystemClock), ttl)
    }

    /// Create a cache with an explicit clock.
    pub fn with_clock(
        source: Box<dyn MarketDataSource>,
        clock: Box<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            lookback: Lookback::default(),
            source,
            clock,
        }
    }

    /// Override the history window requested from the source.
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Return the quote for `symbol`, fetching it when no fresh entry exists.
    pub fn get(&mut self, symbol: &str) -> QuoteOutcome {
        let key = normalize(symbol);
        if key.is_empty() {
            return Err(FetchFailure::new(
                symbol,
                &DashboardError::Format("empty symbol".to_string()),
            ));
        }

        let now = self.clock.now();
        if let Some(entry) = self.entries.get(&key) {
            if now.duration_since(entry.fetched_at) < self.ttl {
                debug!("Cache hit for {}", key);
                return entry.outcome.clone();
            }
        }

        let outcome = self.fetch(&key);
        self.entries.insert(
            key,
            CacheEntry {
                outcome: outcome.clone(),
                fetched_at: now,
            },
        );
        outcome
    }

    fn fetch(&self, symbol: &str) -> QuoteOutcome {
        let result = self
            .source
            .fetch(symbol, &self.lookback)
            .and_then(|fields| Quote::from_fields(symbol, fields, Utc::now()));

        match result {
            Ok(quote) => {
                info!(
                    "Fetched {} from {}: price={:.2}",
                    symbol,
                    self.source.name(),
                    quote.price
                );
                if !quote.is_complete() {
                    debug!("{} is missing {:?}, defaulted", symbol, quote.missing_fields);
                }
                Ok(Arc::new(quote))
            }
            Err(e) => {
                warn!("Fetch of {} from {} failed: {}", symbol, self.source.name(), e);
                Err(FetchFailure::new(symbol, &e))
            }
        }
    }

    /// Discard every entry, fresh or not.
    pub fn clear(&mut self) {
        info!("Quote cache cleared ({} entries)", self.entries.len());
        self.entries.clear();
    }

    /// Drop entries whose age reached the TTL and return their symbols.
    pub fn evict_expired(&mut self) -> Vec<String> {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut expired = Vec::new();

        self.entries.retain(|symbol, entry| {
            if now.duration_since(entry.fetched_at) >= ttl {
                expired.push(symbol.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Whether `symbol` would be served without contacting the source.
    pub fn is_fresh(&self, symbol: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(&normalize(symbol))
            .map(|entry| now.duration_since(entry.fetched_at) < self.ttl)
            .unwrap_or(false)
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
