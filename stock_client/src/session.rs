//! Login state, selected market and watchlist of the running client.
//!
//! Nothing here outlives the process.
use log::{info, warn};
use stock_common::{DashboardError, Market, Result};

/// The only accepted username.
pub const DEMO_USERNAME: &str = "admin";
/// The only accepted password.
pub const DEMO_PASSWORD: &str = "password123";

/// Per-process session state.
#[derive(Debug)]
pub struct Session {
    user: Option<String>,
    /// Market used by search and trending.
    pub market: Market,
    watchlist: Vec<String>,
}

impl Session {
    /// Create a logged-out session on `market`.
    pub fn new(market: Market) -> Self {
        Self {
            user: None,
            market,
            watchlist: Vec::new(),
        }
    }

    /// Check the credential pair and mark the session logged in.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username.trim() == DEMO_USERNAME && password == DEMO_PASSWORD {
            info!("User {} logged in", DEMO_USERNAME);
            self.user = Some(DEMO_USERNAME.to_string());
            Ok(())
        } else {
            warn!("Rejected login for {:?}", username.trim());
            Err(DashboardError::InvalidCredentials)
        }
    }

    /// Return to the login gate. The watchlist is kept.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("User {} logged out", user);
        }
    }

    /// Whether the login gate has been passed.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Add `symbol`; returns `false` when it is already listed.
    pub fn watch(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() || self.watchlist.contains(&symbol) {
            return false;
        }
        self.watchlist.push(symbol);
        true
    }

    /// Remove `symbol`; returns `false` when it was not listed.
    pub fn unwatch(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_ascii_uppercase();
        let before = self.watchlist.len();
        self.watchlist.retain(|s| *s != symbol);
        self.watchlist.len() != before
    }

    /// Watched symbols in insertion order.
    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_demo_credentials_log_in() {
        let mut session = Session::new(Market::IndianNse);
        assert!(matches!(
            session.login("admin", "wrong"),
            Err(DashboardError::InvalidCredentials)
        ));
        assert!(!session.is_logged_in());

        session.login("admin", "password123").unwrap();
        assert!(session.is_logged_in());

        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn watchlist_skips_duplicates_and_keeps_order() {
        let mut session = Session::new(Market::Us);
        assert!(session.watch("aapl"));
        assert!(session.watch("TSLA"));
        assert!(!session.watch(" AAPL "));
        assert!(!session.watch(""));
        assert_eq!(session.watchlist(), ["AAPL", "TSLA"]);

        assert!(session.unwatch("aapl"));
        assert!(!session.unwatch("MSFT"));
        assert_eq!(session.watchlist(), ["TSLA"]);
    }

    #[test]
    fn logout_keeps_watchlist() {
        let mut session = Session::new(Market::Us);
        session.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
        session.watch("NFLX");
        session.logout();
        assert_eq!(session.watchlist().len(), 1);
    }
}
