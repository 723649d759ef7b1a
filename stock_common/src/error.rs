//! Error types shared between the service and the client.
//!
//! The `DashboardError` enum unifies the failure cases of fetching, decoding,
//! catalog lookups and the terminal session, allowing crates to propagate a
//! single error type. The quote cache collapses all of these into a
//! `FetchFailure` before anything reaches the presentation layer.
use std::io;

use thiserror::Error;

/// Unified error type shared by service and client.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error originating from the standard library (stdin, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The market-data endpoint answered with a non-success status code.
    #[error("Upstream returned HTTP {status} for {symbol}")]
    UpstreamStatus {
        /// Requested symbol.
        symbol: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response decoded but lacks a field the quote cannot exist without.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The upstream source does not know the requested symbol.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// A market name that is not part of the catalog.
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    /// Login attempt with a wrong username/password pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}
