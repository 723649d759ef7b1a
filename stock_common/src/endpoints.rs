//! Upstream market-data constants and helpers used by the service.

/// Default base URL of the Yahoo Finance query API.
pub const YAHOO_API_BASE: &str = "https://query1.finance.yahoo.com";
/// Trailing history window requested with every quote.
pub const LOOKBACK_RANGE: &str = "1mo";
/// Bar granularity of the trailing history.
pub const LOOKBACK_INTERVAL: &str = "1d";
/// Number of days the lookback window spans.
pub const LOOKBACK_DAYS: u32 = 30;
/// User agent sent with upstream requests.
pub const USER_AGENT: &str = concat!("stock_dashboard/", env!("CARGO_PKG_VERSION"));

/// Helper to build the chart URL like "{base}/v8/finance/chart/{symbol}?range=..&interval=..".
///
/// The symbol is percent-encoded by the caller.
pub fn chart_url(base: &str, encoded_symbol: &str, range: &str, interval: &str) -> String {
    format!(
        "{}/v8/finance/chart/{}?range={}&interval={}",
        base.trim_end_matches('/'),
        encoded_symbol,
        range,
        interval
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_joins_base_without_double_slash() {
        assert_eq!(
            chart_url("http://localhost:9000/", "TCS.NS", LOOKBACK_RANGE, LOOKBACK_INTERVAL),
            "http://localhost:9000/v8/finance/chart/TCS.NS?range=1mo&interval=1d"
        );
    }
}
