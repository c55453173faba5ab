//! Navigation controller
//!
//! Owns the history stacks and applies the address bar operations to them.
//! Every operation is a total function over the two-stack model; a failed
//! `navigate` leaves the state untouched.

use crate::history::NavigationHistory;
use crate::input::InputResolver;
use crate::location::Location;
use crate::Result;

#[derive(Debug, Clone)]
pub struct NavigationController {
    resolver: InputResolver,
    history: NavigationHistory,
}

impl NavigationController {
    pub fn new(start: Location) -> Self {
        Self {
            resolver: InputResolver::new(),
            history: NavigationHistory::new(start),
        }
    }

    /// Navigate to typed input
    pub fn navigate(&mut self, raw_input: &str) -> Result<Location> {
        let location = self.resolver.resolve(raw_input)?;

        tracing::debug!(url = %location.url, label = %location.label, "Navigate");

        Ok(self.history.push(location).clone())
    }

    /// Navigate to the start location
    pub fn home(&mut self) -> Location {
        let start = self.history.start().clone();
        tracing::debug!(url = %start.url, "Navigate home");
        self.history.push(start).clone()
    }

    pub fn go_back(&mut self) -> Option<Location> {
        let location = self.history.go_back().cloned();
        match &location {
            Some(location) => tracing::debug!(url = %location.url, "Go back"),
            None => tracing::debug!("Go back ignored, at oldest entry"),
        }
        location
    }

    pub fn go_forward(&mut self) -> Option<Location> {
        let location = self.history.go_forward().cloned();
        match &location {
            Some(location) => tracing::debug!(url = %location.url, "Go forward"),
            None => tracing::debug!("Go forward ignored, forward stack empty"),
        }
        location
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!(url = %self.history.current().url, "History cleared");
    }

    pub fn current(&self) -> &Location {
        self.history.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }
}
