//! Reading prompt input without blocking shutdown.
//!
//! A background thread forwards stdin lines over a `crossbeam_channel`; the
//! main loop waits on that channel and on the Ctrl+C shutdown channel at the
//! same time.
use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{Receiver, select, unbounded};
use log::{debug, error};
use stock_common::{DashboardError, Result};

/// Message sent by the stdin reader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line without its terminator.
    Line(String),
    /// Stdin was closed.
    Eof,
}

/// Spawn the stdin reader thread and return its event channel.
pub fn spawn_stdin_reader() -> Receiver<InputEvent> {
    let (tx, rx) = unbounded::<InputEvent>();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if let Err(e) = tx.send(InputEvent::Line(line)) {
                        let err = DashboardError::ChannelSend(e.to_string());
                        error!("{}", err);
                        return;
                    }
                }
                Err(e) => {
                    error!("Read stdin error: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader stopping...");
        let _ = tx.send(InputEvent::Eof);
    });
    rx
}

/// Wait for the next line.
///
/// Returns `Ok(None)` on shutdown or end of input, and an error when the
/// reader thread vanished without saying goodbye.
pub fn next_line(events: &Receiver<InputEvent>, shutdown: &Receiver<()>) -> Result<Option<String>> {
    select! {
        recv(shutdown) -> _ => Ok(None),
        recv(events) -> msg => match msg {
            Ok(InputEvent::Line(line)) => Ok(Some(line)),
            Ok(InputEvent::Eof) => Ok(None),
            Err(e) => Err(DashboardError::ChannelRecv(e.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn forwards_lines_then_stops_at_eof() {
        let (tx, rx) = unbounded();
        let (_shutdown_tx, shutdown_rx) = bounded::<()>(1);
        tx.send(InputEvent::Line("quote AAPL".to_string())).unwrap();
        tx.send(InputEvent::Eof).unwrap();

        assert_eq!(
            next_line(&rx, &shutdown_rx).unwrap(),
            Some("quote AAPL".to_string())
        );
        assert_eq!(next_line(&rx, &shutdown_rx).unwrap(), None);
    }

    #[test]
    fn shutdown_wins_over_waiting() {
        let (_tx, rx) = unbounded::<InputEvent>();
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        shutdown_tx.send(()).unwrap();

        assert_eq!(next_line(&rx, &shutdown_rx).unwrap(), None);
    }

    #[test]
    fn dropped_reader_is_an_error() {
        let (tx, rx) = unbounded::<InputEvent>();
        let (_shutdown_tx, shutdown_rx) = bounded::<()>(1);
        drop(tx);

        assert!(matches!(
            next_line(&rx, &shutdown_rx),
            Err(DashboardError::ChannelRecv(_))
        ));
    }
}
