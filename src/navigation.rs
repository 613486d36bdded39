//! Navigation side effects triggered by the session layer
//!
//! Guards and logout never touch a page environment directly; they go
//! through a [`Navigator`] supplied at construction time.

use std::collections::BTreeMap;

/// Redirect and blocking-acknowledgement capability
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Leave the current page for `location`
    fn redirect(&self, location: &str);

    /// Show `message` and wait until the user acknowledges it
    fn alert(&self, message: &str);
}

/// Navigator for the command line: redirects become notices on stderr.
///
/// Callers can attach a hint to a location; the hint is printed instead of
/// the generic "Redirected to" notice.
#[derive(Debug, Clone, Default)]
pub struct TerminalNavigator {
    hints: BTreeMap<String, String>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint(mut self, location: impl Into<String>, hint: impl Into<String>) -> Self {
        self.hints.insert(location.into(), hint.into());
        self
    }

    fn notice(&self, location: &str) -> String {
        match self.hints.get(location) {
            Some(hint) => hint.clone(),
            None => format!("Redirected to {}", location),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, location: &str) {
        tracing::debug!("Redirecting to {}", location);
        eprintln!("{}", self.notice(location));
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
