//! Markets and the built-in symbol catalog shared between service and client.
//!
//! The catalog is a static, compiled-in table: two markets with fifteen
//! symbols each, kept in a fixed order. Search is a plain case-insensitive
//! substring match over symbol and display name; results keep catalog order.

use clap::ValueEnum;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::DashboardError;

/// Maximum number of rows a search returns.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Number of entries shown in the trending section of a market.
pub const TRENDING_COUNT: usize = 6;

/// Market partition of the catalog.
///
/// Parses from the display name (`"US Stocks"`) as well as from the short
/// CLI name (`us`), ignoring ASCII case.
#[derive(
    Debug, Clone, Copy, Serialize, ValueEnum, Display, EnumString, EnumIter, Hash, Eq, PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Market {
    /// National Stock Exchange of India.
    #[strum(to_string = "Indian Stocks (NSE)", serialize = "nse")]
    #[value(name = "nse")]
    IndianNse,
    /// US exchanges.
    #[strum(to_string = "US Stocks", serialize = "us")]
    #[value(name = "us")]
    Us,
}

/// One catalog row.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Ticker symbol as the upstream source expects it.
    pub symbol: &'static str,
    /// Company display name.
    pub name: &'static str,
}

const fn entry(symbol: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { symbol, name }
}

const INDIAN_NSE: [CatalogEntry; 15] = [
    entry("RELIANCE.NS", "Reliance Industries Ltd"),
    entry("TCS.NS", "Tata Consultancy Services"),
    entry("INFY.NS", "Infosys Limited"),
    entry("HDFCBANK.NS", "HDFC Bank Ltd"),
    entry("ICICIBANK.NS", "ICICI Bank Ltd"),
    entry("HINDUNILVR.NS", "Hindustan Unilever"),
    entry("SBIN.NS", "State Bank of India"),
    entry("BHARTIARTL.NS", "Bharti Airtel Ltd"),
    entry("ITC.NS", "ITC Limited"),
    entry("KOTAKBANK.NS", "Kotak Mahindra Bank"),
    entry("LT.NS", "Larsen & Toubro"),
    entry("AXISBANK.NS", "Axis Bank Ltd"),
    entry("TATAMOTORS.NS", "Tata Motors Ltd"),
    entry("WIPRO.NS", "Wipro Limited"),
    entry("MARUTI.NS", "Maruti Suzuki India"),
];

const US: [CatalogEntry; 15] = [
    entry("AAPL", "Apple Inc"),
    entry("MSFT", "Microsoft Corporation"),
    entry("GOOGL", "Alphabet Inc Class A"),
    entry("AMZN", "Amazon.com Inc"),
    entry("NVDA", "NVIDIA Corporation"),
    entry("TSLA", "Tesla Inc"),
    entry("META", "Meta Platforms Inc"),
    entry("BRK-B", "Berkshire Hathaway"),
    entry("JPM", "JPMorgan Chase & Co"),
    entry("V", "Visa Inc"),
    entry("WMT", "Walmart Inc"),
    entry("MA", "Mastercard Inc"),
    entry("PG", "Procter & Gamble Co"),
    entry("DIS", "Walt Disney Co"),
    entry("NFLX", "Netflix Inc"),
];

impl Market {
    /// Parse a market from its display or short name.
    pub fn parse_name(name: &str) -> Result<Self, DashboardError> {
        let trimmed = name.trim();
        trimmed
            .parse::<Market>()
            .map_err(|_| DashboardError::UnknownMarket(trimmed.to_string()))
    }

    /// Catalog rows of this market in their fixed order.
    pub fn entries(self) -> &'static [CatalogEntry] {
        match self {
            Market::IndianNse => &INDIAN_NSE,
            Market::Us => &US,
        }
    }

    /// Example query hint shown by the client's search prompt.
    pub fn search_hint(self) -> &'static str {
        match self {
            Market::IndianNse => "Reliance, TCS",
            Market::Us => "Apple, Tesla",
        }
    }
}

/// Read-only view over the built-in tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    max_results: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            max_results: MAX_SEARCH_RESULTS,
        }
    }
}

impl Catalog {
    /// Create the catalog backed by the compiled-in tables.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// All rows of `market`.
    pub fn entries(&self, market: Market) -> &'static [CatalogEntry] {
        market.entries()
    }

    /// Case-insensitive substring search over symbol and name.
    ///
    /// An empty (or blank) query yields no rows. At most ten rows are
    /// returned, in catalog order.
    pub fn search(&self, query: &str, market: Market) -> Vec<CatalogEntry> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        market
            .entries()
            .iter()
            .filter(|e| {
                e.symbol.to_lowercase().contains(&needle) || e.name.to_lowercase().contains(&needle)
            })
            .take(self.max_results)
            .copied()
            .collect()
    }

    /// First `count` rows of `market`.
    pub fn trending(&self, market: Market, count: usize) -> &'static [CatalogEntry] {
        let entries = market.entries();
        &entries[..count.min(entries.len())]
    }

    /// Find the market and row of `symbol`, ignoring ASCII case.
    pub fn lookup(&self, symbol: &str) -> Option<(Market, CatalogEntry)> {
        Market::iter().find_map(|market| {
            market
                .entries()
                .iter()
                .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
                .map(|e| (market, *e))
        })
    }
}
