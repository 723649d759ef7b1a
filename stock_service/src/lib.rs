//!
//! Quote service of the stock dashboard.
//!
//! This crate holds everything between the presentation layer and the
//! upstream market data:
//! - `source`: the `MarketDataSource` trait with the Yahoo HTTP source and an
//!   offline synthetic source.
//! - `clock`: injectable time source used for cache ages.
//! - `cache`: `QuoteCache`, the fixed-TTL memoization of quote fetches.
//! - `config`: `DashboardConfig` with TTL, lookback and upstream settings.
//! - `dashboard`: `Dashboard`, the context object owning catalog and cache.
#![warn(missing_docs)]
pub mod cache;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod source;

pub use cache::QuoteCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DashboardConfig, Lookback};
pub use dashboard::Dashboard;
pub use source::MarketDataSource;
