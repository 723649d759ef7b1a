//! The dashboard context object.
//!
//! `Dashboard` owns the catalog and the quote cache; the hosting application
//! creates one and passes it to every UI action. There is no global state.

use log::debug;
use stock_common::catalog::TRENDING_COUNT;
use stock_common::{Catalog, CatalogEntry, Market, Result};

use crate::cache::{QuoteCache, QuoteOutcome};
use crate::config::DashboardConfig;
use crate::source::{self, MarketDataSource};

/// Catalog search plus cached quote access.
pub struct Dashboard {
    catalog: Catalog,
    cache: QuoteCache,
}

impl Dashboard {
    /// Build a dashboard with the source selected by `config`.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let source = source::from_config(config)?;
        Ok(Self::new(config, source))
    }

    /// Build a dashboard over an explicit source.
    pub fn new(config: &DashboardConfig, source: Box<dyn MarketDataSource>) -> Self {
        let cache = QuoteCache::new(source, config.ttl).with_lookback(config.lookback);
        Self::from_parts(Catalog::builtin(), cache)
    }

    /// Assemble a dashboard from ready-made parts.
    pub fn from_parts(catalog: Catalog, cache: QuoteCache) -> Self {
        Self { catalog, cache }
    }

    /// Cached quote of `symbol`.
    pub fn get_quote(&mut self, symbol: &str) -> QuoteOutcome {
        self.cache.get(symbol)
    }

    /// Catalog rows of `market` matching `query`.
    pub fn search(&self, query: &str, market: Market) -> Vec<CatalogEntry> {
        let results = self.catalog.search(query, market);
        debug!("Search {:?} in {}: {} result(s)", query, market, results.len());
        results
    }

    /// Leading catalog rows of `market` with their quotes.
    pub fn trending(&mut self, market: Market) -> Vec<(CatalogEntry, QuoteOutcome)> {
        self.catalog
            .trending(market, TRENDING_COUNT)
            .iter()
            .map(|entry| (*entry, self.cache.get(entry.symbol)))
            .collect()
    }

    /// Drop every cached quote (user-triggered refresh).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Evict expired cache entries; returns how many were dropped.
    pub fn housekeeping(&mut self) -> usize {
        let expired = self.cache.evict_expired();
        if !expired.is_empty() {
            debug!("Evicted expired quotes: {:?}", expired);
        }
        expired.len()
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The quote cache in use.
    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }
}
