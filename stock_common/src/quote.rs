//! Quote data model and derived-field policy.
//!
//! A `Quote` is built once from the loosely-typed `QuoteFields` bag a market
//! data source returns and is never mutated afterwards. Derived values
//! (change, percent change, currency) are computed here so every source
//! follows the same defaults.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

use crate::error::DashboardError;
use crate::result::Result;

/// Ticker suffixes of Indian exchanges (NSE, BSE).
const RUPEE_SUFFIXES: [&str; 2] = [".NS", ".BO"];

/// Currency symbol shown next to prices.
#[derive(Debug, Clone, Copy, Serialize, Display, PartialEq, Eq)]
pub enum Currency {
    /// Indian rupee.
    #[strum(to_string = "₹")]
    Rupee,
    /// Fallback for every other ticker.
    #[strum(to_string = "$")]
    Dollar,
}

impl Currency {
    /// Infer the currency from the ticker's exchange suffix.
    pub fn infer(symbol: &str) -> Self {
        let upper = symbol.to_ascii_uppercase();
        if RUPEE_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix)) {
            Currency::Rupee
        } else {
            Currency::Dollar
        }
    }
}

/// One daily close of the trailing price series.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PricePoint {
    /// Bar timestamp (UTC).
    pub timestamp: DateTime<Utc>,
    /// Closing price of the bar.
    pub close: f64,
}

/// Raw field bag returned by a market data source.
///
/// Everything is optional; `Quote::from_fields` decides what a missing value
/// means.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteFields {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub open: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub volume: Option<u64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub history: Vec<PricePoint>,
}

/// Market quote snapshot for a single ticker symbol.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub previous_close: f64,
    /// `price - previous_close`.
    pub change: f64,
    /// `change / previous_close * 100`, zero when previous close is zero.
    pub change_percent: f64,
    pub history: Vec<PricePoint>,
    pub currency: Currency,
    pub market_cap: f64,
    /// Source fields that were absent and replaced by a default.
    pub missing_fields: Vec<&'static str>,
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    /// Derive a quote from a source response.
    ///
    /// The current price is the only mandatory value: `current_price` is
    /// preferred over `regular_market_price`, and a response carrying neither
    /// is malformed. A missing previous close falls back to the current price
    /// (zero change); missing open/high/low/volume/market cap become zero.
    pub fn from_fields(symbol: &str, fields: QuoteFields, fetched_at: DateTime<Utc>) -> Result<Quote> {
        let price = fields
            .current_price
            .or(fields.regular_market_price)
            .filter(|p| p.is_finite())
            .ok_or_else(|| DashboardError::MalformedResponse(format!("{symbol}: no current price")))?;

        let mut missing_fields = Vec::new();
        let mut or_zero = |value: Option<f64>, field: &'static str| {
            value.unwrap_or_else(|| {
                missing_fields.push(field);
                0.0
            })
        };
        let open = or_zero(fields.open, "open");
        let high = or_zero(fields.day_high, "high");
        let low = or_zero(fields.day_low, "low");
        let market_cap = or_zero(fields.market_cap, "market_cap");

        let volume = fields.volume.unwrap_or_else(|| {
            missing_fields.push("volume");
            0
        });
        let previous_close = fields.previous_close.unwrap_or_else(|| {
            missing_fields.push("previous_close");
            price
        });

        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        let name = fields
            .long_name
            .or(fields.short_name)
            .unwrap_or_else(|| symbol.to_string());

        Ok(Quote {
            symbol: symbol.to_string(),
            name,
            price,
            open,
            high,
            low,
            volume,
            previous_close,
            change,
            change_percent,
            history: fields.history,
            currency: Currency::infer(symbol),
            market_cap,
            missing_fields,
            fetched_at,
        })
    }

    /// Whether the price moved up (or stayed flat) since the previous close.
    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }

    /// Whether every numeric field came from the source.
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Encode the quote to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec_pretty(self)?;
        Ok(json)
    }
}

/// Absence marker returned in place of a quote.
///
/// Network errors, unknown tickers and malformed responses all collapse into
/// this one kind; the reason is kept for display only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no data for {symbol}: {reason}")]
pub struct FetchFailure {
    /// Symbol that failed.
    pub symbol: String,
    /// Human-readable cause.
    pub reason: String,
}

impl FetchFailure {
    /// Wrap a source error for `symbol`.
    pub fn new(symbol: &str, err: &DashboardError) -> Self {
        Self {
            symbol: symbol.to_string(),
            reason: err.to_string(),
        }
    }
}
