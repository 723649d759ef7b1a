//! Commands typed at the dashboard prompt.
//!
//! A line is a verb followed by an optional argument, e.g. `search tata` or
//! `market us`. Verbs are case-insensitive; the argument keeps its text.
use std::str::FromStr;

use stock_common::{DashboardError, Market};

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  search <query>     search the current market by symbol or name
  quote <symbol>     show the quote card of a symbol
  trending           show the leading stocks of the current market
  market <nse|us>    switch market
  watch <symbol>     add a symbol to the watchlist
  unwatch <symbol>   remove a symbol from the watchlist
  watchlist          show watchlist quotes
  refresh            drop cached quotes
  logout             end the session
  help               show this help
  quit               exit";

/// One parsed prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Catalog search; an empty query shows nothing.
    Search(String),
    /// Quote card of one symbol.
    Quote(String),
    /// Trending section of the current market.
    Trending,
    /// Switch the current market.
    Market(Market),
    /// Add to the watchlist.
    Watch(String),
    /// Remove from the watchlist.
    Unwatch(String),
    /// Show the watchlist.
    Watchlist,
    /// Clear the quote cache.
    Refresh,
    /// Back to the login gate.
    Logout,
    /// Print the command list.
    Help,
    /// Exit the client.
    Quit,
}

impl FromStr for Command {
    type Err = DashboardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let required = |usage: &str| {
            if arg.is_empty() {
                Err(DashboardError::Format(format!("usage: {}", usage)))
            } else {
                Ok(arg.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Command::Search(arg.to_string())),
            "quote" | "q" => required("quote <symbol>").map(Command::Quote),
            "trending" => Ok(Command::Trending),
            "market" => Market::parse_name(&required("market <nse|us>")?).map(Command::Market),
            "watch" => required("watch <symbol>").map(Command::Watch),
            "unwatch" => required("unwatch <symbol>").map(Command::Unwatch),
            "watchlist" => Ok(Command::Watchlist),
            "refresh" => Ok(Command::Refresh),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(DashboardError::Format(format!("unknown command: {}", other))),
        }
    }
}
