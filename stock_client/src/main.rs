//! Stock Dashboard client: a terminal front-end over the quote service. It
//! asks for the demo credentials, then reads commands from stdin: catalog
//! search, quote cards with a price sparkline, the trending section of the
//! selected market, an in-session watchlist and a refresh that drops every
//! cached quote.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --market us --username admin --password password123
//! stock_client --offline --ttl-secs 10
//! ```
//!
//! Quotes are served from a fixed-TTL cache (30 s by default); see
//! `stock_service::cache` for details.
#![warn(missing_docs)]
mod args;
mod command;
mod input;
mod render;
mod session;

use crate::args::Args;
use crate::command::{Command, HELP};
use crate::input::{InputEvent, next_line, spawn_stdin_reader};
use crate::session::{DEMO_PASSWORD, DEMO_USERNAME, Session};
use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use log::{debug, info, warn};
use stock_common::DashboardError;
use stock_common::Result;
use stock_common::{Market, Quote};
use stock_service::Dashboard;
use std::io::{self, Write};

/// What the main loop does after handling a line.
enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down client...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| DashboardError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    let config = args.to_config();
    let mut dashboard = Dashboard::from_config(&config)?;
    let mut session = Session::new(args.market);
    let events = spawn_stdin_reader();
    let mut out = io::stdout().lock();

    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        match session.login(username, password) {
            Ok(()) => writeln!(out, "✓ Login successful!")?,
            Err(e) => writeln!(out, "✗ {}", e)?,
        }
    }

    loop {
        let flow = if session.is_logged_in() {
            write!(out, "[{}] > ", session.market)?;
            out.flush()?;
            match next_line(&events, &shutdown_rx)? {
                Some(line) => {
                    let evicted = dashboard.housekeeping();
                    if evicted > 0 {
                        debug!("{} cached quote(s) expired", evicted);
                    }
                    handle_line(&mut out, &line, &mut dashboard, &mut session, args.json)?
                }
                None => Flow::Quit,
            }
        } else {
            login_gate(&mut out, &events, &shutdown_rx, &mut session)?
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    info!("Client stopping...");
    Ok(())
}

/// Prompt for the credential pair once.
fn login_gate(
    out: &mut impl Write,
    events: &Receiver<InputEvent>,
    shutdown: &Receiver<()>,
    session: &mut Session,
) -> Result<Flow> {
    writeln!(out, "\n📊 Stock Dashboard - Professional Stock Market Analytics")?;
    writeln!(
        out,
        "💡 Demo credentials → username: {} | password: {}",
        DEMO_USERNAME, DEMO_PASSWORD
    )?;

    write!(out, "👤 Username: ")?;
    out.flush()?;
    let Some(username) = next_line(events, shutdown)? else {
        return Ok(Flow::Quit);
    };
    write!(out, "🔒 Password: ")?;
    out.flush()?;
    let Some(password) = next_line(events, shutdown)? else {
        return Ok(Flow::Quit);
    };

    match session.login(&username, &password) {
        Ok(()) => {
            writeln!(out, "✓ Login successful! Type `help` for commands.")?;
            writeln!(
                out,
                "Search by stock name or symbol (e.g., {})",
                session.market.search_hint()
            )?;
        }
        Err(e) => writeln!(out, "✗ {}", e)?,
    }
    Ok(Flow::Continue)
}

fn handle_line(
    out: &mut impl Write,
    line: &str,
    dashboard: &mut Dashboard,
    session: &mut Session,
    json: bool,
) -> Result<Flow> {
    if line.trim().is_empty() {
        return Ok(Flow::Continue);
    }
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected input {:?}: {}", line, e);
            writeln!(out, "{}\nType `help` for commands.", e)?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::Search(query) => search(out, dashboard, session.market, &query)?,
        Command::Quote(symbol) => show_quote(out, dashboard, &symbol, json)?,
        Command::Trending => {
            writeln!(out, "🔥 Trending Stocks - {}", session.market)?;
            for (entry, outcome) in dashboard.trending(session.market) {
                match outcome {
                    Ok(quote) => print_quote(out, &quote, json)?,
                    Err(_) => writeln!(out, "{}  (no data)", entry.symbol)?,
                }
            }
        }
        Command::Market(market) => {
            session.market = market;
            writeln!(out, "Market: {}", market)?;
        }
        Command::Watch(symbol) => {
            if session.watch(&symbol) {
                writeln!(out, "⭐ Added {} to watchlist", symbol.trim().to_ascii_uppercase())?;
            } else {
                writeln!(out, "{} is already on the watchlist", symbol.trim())?;
            }
        }
        Command::Unwatch(symbol) => {
            if !session.unwatch(&symbol) {
                writeln!(out, "{} is not on the watchlist", symbol.trim())?;
            }
        }
        Command::Watchlist => {
            if session.watchlist().is_empty() {
                writeln!(out, "No stocks added")?;
            }
            for symbol in session.watchlist() {
                show_quote(out, dashboard, symbol, json)?;
            }
        }
        Command::Refresh => {
            dashboard.clear_cache();
            writeln!(out, "🔄 Data refreshed")?;
        }
        Command::Logout => {
            session.logout();
            writeln!(out, "🚪 Logged out")?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn search(out: &mut impl Write, dashboard: &mut Dashboard, market: Market, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        writeln!(out, "Type stock name or symbol (e.g., {})", market.search_hint())?;
        return Ok(());
    }

    let results = dashboard.search(query, market);
    if results.is_empty() {
        writeln!(out, "No results found for '{}'", query)?;
        return Ok(());
    }

    writeln!(out, "Found {} result(s)", results.len())?;
    for entry in &results {
        let quote = dashboard.get_quote(entry.symbol).ok();
        writeln!(out, "{}", render::result_row(entry, quote.as_deref()))?;
    }
    Ok(())
}

fn show_quote(out: &mut impl Write, dashboard: &mut Dashboard, symbol: &str, json: bool) -> Result<()> {
    match dashboard.get_quote(symbol) {
        Ok(quote) => print_quote(out, &quote, json),
        Err(failure) => {
            writeln!(out, "{}", render::failure(&failure))?;
            Ok(())
        }
    }
}

fn print_quote(out: &mut impl Write, quote: &Quote, json: bool) -> Result<()> {
    if json {
        out.write_all(&quote.to_json_bytes()?)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::card(quote))?;
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
