//! Plain-text rendering of quote cards, search results and charts.
use std::fmt::Write;

use stock_common::format::compact;
use stock_common::{CatalogEntry, FetchFailure, PricePoint, Quote};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Characters of a name shown in a search result row.
const NAME_WIDTH: usize = 25;

/// One-line chart of the closing prices; `None` for an empty history.
pub fn sparkline(history: &[PricePoint]) -> Option<String> {
    if history.is_empty() {
        return None;
    }
    let (min, max) = history.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        (lo.min(p.close), hi.max(p.close))
    });
    let span = max - min;
    let top = (SPARK_BARS.len() - 1) as f64;

    Some(
        history
            .iter()
            .map(|p| {
                let level = if span > 0.0 {
                    ((p.close - min) / span * top).round() as usize
                } else {
                    SPARK_BARS.len() / 2
                };
                SPARK_BARS[level.min(SPARK_BARS.len() - 1)]
            })
            .collect(),
    )
}

/// Full quote card.
pub fn card(quote: &Quote) -> String {
    let c = quote.currency;
    let arrow = if quote.is_gain() { '↑' } else { '↓' };
    let mut out = String::new();

    let _ = writeln!(out, "{}  {}", quote.symbol, quote.name);
    let _ = writeln!(
        out,
        "  {}{:.2}  {} {}{:.2} ({:.2}%)",
        c,
        quote.price,
        arrow,
        c,
        quote.change.abs(),
        quote.change_percent.abs()
    );
    let _ = writeln!(
        out,
        "  OPEN {}{:.2}  HIGH {}{:.2}  LOW {}{:.2}",
        c, quote.open, c, quote.high, c, quote.low
    );
    let _ = writeln!(
        out,
        "  VOLUME {}  MARKET CAP {}{}",
        compact(quote.volume as f64),
        c,
        compact(quote.market_cap)
    );
    if let Some(chart) = sparkline(&quote.history) {
        let _ = writeln!(out, "  {}", chart);
    }
    if !quote.is_complete() {
        let _ = writeln!(
            out,
            "  (not reported: {})",
            quote.missing_fields.join(", ")
        );
    }
    out
}

/// One search result row with an up/down marker when a quote is available.
pub fn result_row(entry: &CatalogEntry, quote: Option<&Quote>) -> String {
    let name: String = entry.name.chars().take(NAME_WIDTH).collect();
    let marker = match quote {
        Some(q) if q.is_gain() => "↑",
        Some(_) => "↓",
        None => "-",
    };
    format!("{:<14} {:<25} {}", entry.symbol, name, marker)
}

/// Message shown in place of a quote.
pub fn failure(failure: &FetchFailure) -> String {
    format!("{}: no data available ({})", failure.symbol, failure.reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stock_common::QuoteFields;

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: Utc.timestamp_opt(1_715_831_100 + i as i64 * 86_400, 0).unwrap(),
                close,
            })
            .collect()
    }

    fn quote(previous_close: f64) -> Quote {
        let fields = QuoteFields {
            long_name: Some("Tata Consultancy Services".to_string()),
            current_price: Some(3912.5),
            open: Some(3895.2),
            day_high: Some(3930.0),
            day_low: Some(3880.1),
            volume: Some(1_845_120),
            previous_close: Some(previous_close),
            market_cap: Some(1.42e13),
            history: points(&[3800.0, 3850.0, 3912.5]),
            ..QuoteFields::default()
        };
        Quote::from_fields("TCS.NS", fields, Utc::now()).unwrap()
    }

    #[test]
    fn sparkline_scales_between_min_and_max() {
        assert_eq!(sparkline(&points(&[1.0, 2.0, 3.0])).unwrap(), "▁▅█");
        assert_eq!(sparkline(&points(&[5.0, 5.0])).unwrap(), "▅▅");
        assert!(sparkline(&[]).is_none());
    }

    #[test]
    fn card_shows_price_change_and_metrics() {
        let text = card(&quote(3900.0));
        assert!(text.contains("TCS.NS  Tata Consultancy Services"));
        assert!(text.contains("₹3912.50  ↑ ₹12.50 (0.32%)"));
        assert!(text.contains("VOLUME 1.85M  MARKET CAP ₹14.20T"));
        assert!(!text.contains("not reported"));
    }

    #[test]
    fn card_marks_losses_with_down_arrow() {
        let text = card(&quote(4100.0));
        assert!(text.contains("↓ ₹187.50 (4.57%)"));
    }

    #[test]
    fn result_row_truncates_long_names() {
        let entry = CatalogEntry {
            symbol: "TCS.NS",
            name: "Tata Consultancy Services",
        };
        let row = result_row(&entry, None);
        assert!(row.starts_with("TCS.NS "));
        assert!(row.ends_with('-'));
        assert!(result_row(&entry, Some(&quote(3900.0))).ends_with('↑'));
    }
}
