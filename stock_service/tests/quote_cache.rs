use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use stock_common::{Catalog, DashboardError, Market, QuoteFields, Result};
use stock_service::{
    Dashboard, DashboardConfig, Lookback, ManualClock, MarketDataSource, QuoteCache,
};

const TTL: Duration = Duration::from_secs(30);

/// Source that counts calls and fails while `failing` is set.
#[derive(Clone, Default)]
struct CountingSource {
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    previous_close: Option<f64>,
}

impl CountingSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn fetch(&self, symbol: &str, _lookback: &Lookback) -> Result<QuoteFields> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(DashboardError::Transport(format!("{symbol}: connection refused")));
        }
        Ok(QuoteFields {
            short_name: Some(format!("{symbol} call {call}")),
            regular_market_price: Some(100.0 + call as f64),
            previous_close: self.previous_close.or(Some(100.0)),
            ..QuoteFields::default()
        })
    }
}

fn cache_with(source: &CountingSource, clock: &ManualClock) -> QuoteCache {
    QuoteCache::with_clock(Box::new(source.clone()), Box::new(clock.clone()), TTL)
}

#[test]
fn repeated_get_within_ttl_hits_source_once() {
    let source = CountingSource::default();
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    let first = cache.get("AAPL").unwrap();
    clock.advance(Duration::from_secs(29));
    let second = cache.get("AAPL").unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(second.name, "AAPL call 1");
}

#[test]
fn expired_entry_is_replaced_by_fresh_fetch() {
    let source = CountingSource::default();
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    cache.get("AAPL").unwrap();
    clock.advance(TTL);
    let refreshed = cache.get("AAPL").unwrap();

    assert_eq!(source.calls(), 2);
    assert_eq!(refreshed.price, 102.0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn clear_forces_next_get_to_fetch() {
    let source = CountingSource::default();
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    cache.get("TCS.NS").unwrap();
    cache.clear();
    cache.get("TCS.NS").unwrap();

    assert_eq!(source.calls(), 2);
}

#[test]
fn symbols_are_cached_independently() {
    let source = CountingSource::default();
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    cache.get("AAPL").unwrap();
    cache.get("MSFT").unwrap();
    cache.get("AAPL").unwrap();
    cache.get("MSFT").unwrap();

    assert_eq!(source.calls(), 2);
}

#[test]
fn failure_is_cached_for_the_ttl_window() {
    let source = CountingSource::default();
    source.failing.store(true, Ordering::SeqCst);
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    let first = cache.get("XYZ").unwrap_err();
    let second = cache.get("XYZ").unwrap_err();
    assert_eq!(first, second);
    assert_eq!(first.symbol, "XYZ");
    assert_eq!(source.calls(), 1);

    // The source recovers, but the stored failure is still served.
    source.failing.store(false, Ordering::SeqCst);
    clock.advance(Duration::from_secs(10));
    assert!(cache.get("XYZ").is_err());
    assert_eq!(source.calls(), 1);

    clock.advance(Duration::from_secs(20));
    assert!(cache.get("XYZ").is_ok());
    assert_eq!(source.calls(), 2);
}

#[test]
fn zero_previous_close_gives_zero_percent_change() {
    let source = CountingSource {
        previous_close: Some(0.0),
        ..CountingSource::default()
    };
    let clock = ManualClock::new();
    let mut cache = cache_with(&source, &clock);

    let quote = cache.get("AAPL").unwrap();

    assert_eq!(quote.change_percent, 0.0);
    assert_eq!(quote.change, 101.0);
}

#[test]
fn dashboard_trending_fetches_six_quotes_once() {
    let source = CountingSource::default();
    let clock = ManualClock::new();
    let mut dashboard = Dashboard::from_parts(Catalog::builtin(), cache_with(&source, &clock));

    let trending = dashboard.trending(Market::Us);
    assert_eq!(trending.len(), 6);
    assert_eq!(trending[0].0.symbol, "AAPL");
    assert!(trending.iter().all(|(_, quote)| quote.is_ok()));

    dashboard.trending(Market::Us);
    assert_eq!(source.calls(), 6);

    clock.advance(TTL);
    assert_eq!(dashboard.housekeeping(), 6);
    assert!(dashboard.cache().is_empty());
}

#[test]
fn dashboard_search_and_refresh() {
    let source = CountingSource::default();
    let config = DashboardConfig::default();
    let mut dashboard = Dashboard::new(&config, Box::new(source.clone()));

    let results = dashboard.search("bank", Market::IndianNse);
    let symbols: Vec<&str> = results.iter().map(|e| e.symbol).collect();
    assert_eq!(
        symbols,
        vec!["HDFCBANK.NS", "ICICIBANK.NS", "SBIN.NS", "KOTAKBANK.NS", "AXISBANK.NS"]
    );

    dashboard.get_quote("SBIN.NS").unwrap();
    dashboard.clear_cache();
    dashboard.get_quote("SBIN.NS").unwrap();
    assert_eq!(source.calls(), 2);
}

#[test]
fn offline_dashboard_serves_catalog_symbols() {
    let config = DashboardConfig {
        offline: true,
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::from_config(&config).unwrap();

    let quote = dashboard.get_quote("RELIANCE.NS").unwrap();
    assert_eq!(quote.currency.to_string(), "₹");
    assert_eq!(quote.history.len(), 30);
    assert!(quote.is_complete());
    assert!(dashboard.get_quote("NOT-LISTED").is_err());
}
