//! Yahoo Finance chart API source.
//!
//! One blocking GET per fetch:
//! `{base}/v8/finance/chart/{symbol}?range=1mo&interval=1d`. Quote fields are
//! read from `chart.result[0].meta`, the history from the timestamp and close
//! arrays of the first indicator set.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use stock_common::endpoints::chart_url;
use stock_common::{DashboardError, PricePoint, QuoteFields, Result};

use super::MarketDataSource;
use crate::config::Lookback;

/// Market data from the Yahoo Finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooSource {
    client: Client,
    base: String,
}

impl YahooSource {
    /// Build a source against `base` (e.g. `https://query1.finance.yahoo.com`).
    pub fn new(base: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: base.to_string(),
        })
    }
}

impl MarketDataSource for YahooSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn fetch(&self, symbol: &str, lookback: &Lookback) -> Result<QuoteFields> {
        let encoded = urlencoding::encode(symbol);
        let url = chart_url(&self.base, &encoded, lookback.range, lookback.interval);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                DashboardError::Transport(format!("request timeout: {}", e))
            } else if e.is_connect() {
                DashboardError::Transport(format!("connection failed: {}", e))
            } else {
                DashboardError::Transport(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DashboardError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(symbol, status.as_u16(), &body));
        }

        parse_chart(symbol, &body)
    }
}

/// Decode a chart response body into quote fields.
pub(crate) fn parse_chart(symbol: &str, body: &str) -> Result<QuoteFields> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(not_found(symbol, &err));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DashboardError::TickerNotFound(symbol.to_string()))?;

    let bars = result.indicators.quote.into_iter().next().unwrap_or_default();
    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.len() != bars.close.len() && !bars.close.is_empty() {
        return Err(DashboardError::MalformedResponse(format!(
            "{}: {} timestamps for {} closes",
            symbol,
            timestamps.len(),
            bars.close.len()
        )));
    }

    let history: Vec<PricePoint> = timestamps
        .iter()
        .zip(bars.close.iter())
        .filter_map(|(&ts, close)| {
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
            close.map(|close| PricePoint { timestamp, close })
        })
        .collect();

    let meta = result.meta;
    let open = meta
        .regular_market_open
        .or_else(|| bars.open.iter().rev().flatten().next().copied());
    let previous_close = meta.previous_close.or_else(|| {
        history
            .len()
            .checked_sub(2)
            .map(|index| history[index].close)
    });

    Ok(QuoteFields {
        long_name: meta.long_name,
        short_name: meta.short_name,
        current_price: None,
        regular_market_price: meta.regular_market_price,
        open,
        day_high: meta.regular_market_day_high,
        day_low: meta.regular_market_day_low,
        volume: meta.regular_market_volume,
        previous_close,
        market_cap: meta.market_cap,
        history,
    })
}

/// Map a non-success response to an error.
///
/// Unknown tickers come back as 404 with a chart error payload; anything else
/// is reported with its status code.
fn status_error(symbol: &str, status: u16, body: &str) -> DashboardError {
    match serde_json::from_str::<ChartResponse>(body) {
        Ok(ChartResponse {
            chart: ChartData {
                error: Some(err), ..
            },
        }) => not_found(symbol, &err),
        _ => DashboardError::UpstreamStatus {
            symbol: symbol.to_string(),
            status,
        },
    }
}

fn not_found(symbol: &str, err: &ChartError) -> DashboardError {
    debug!(
        "Chart error for {}: {} {}",
        symbol,
        err.code,
        err.description.as_deref().unwrap_or_default()
    );
    DashboardError::TickerNotFound(symbol.to_string())
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_open: Option<f64>,
    #[serde(default)]
    regular_market_day_high: Option<f64>,
    #[serde(default)]
    regular_market_day_low: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<u64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartBars>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartBars {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}
