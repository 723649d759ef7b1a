//!
//! Common types and utilities shared by the stock service and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `DashboardError` used across the workspace.
//! - `result`: handy `Result<T, DashboardError>` alias.
//! - `catalog`: markets, the built-in symbol catalog and its search.
//! - `quote`: the `Quote` model, derived fields and currency inference.
//! - `endpoints`: upstream market-data constants and URL helpers.
//! - `format`: compact number formatting for display.
#![warn(missing_docs)]
pub mod catalog;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod quote;
pub mod result;

pub use catalog::{Catalog, CatalogEntry, Market};
pub use error::DashboardError;
pub use quote::{Currency, FetchFailure, PricePoint, Quote, QuoteFields};
pub use result::Result;
