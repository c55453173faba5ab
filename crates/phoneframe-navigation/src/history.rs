//! Back/forward history
//!
//! Two stacks, both always present:
//! ```text
//! history: [start, ..., current]   (never empty)
//! forward: [..., next]             (top = most recently backed out)
//! ```

use crate::location::Location;

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    /// Seed entry, restored by `clear`
    start: Location,
    /// Visited locations, oldest first, current on top
    history: Vec<Location>,
    /// Locations removed by `go_back`
    forward: Vec<Location>,
}

impl NavigationHistory {
    pub fn new(start: Location) -> Self {
        Self {
            history: vec![start.clone()],
            forward: Vec::new(),
            start,
        }
    }

    pub fn start(&self) -> &Location {
        &self.start
    }

    /// Current location (top of the history stack)
    pub fn current(&self) -> &Location {
        self.history.last().unwrap_or(&self.start)
    }

    /// Push a new location, invalidating forward history
    pub fn push(&mut self, location: Location) -> &Location {
        self.forward.clear();
        self.history.push(location);
        self.current()
    }

    /// Move the current location onto the forward stack.
    /// Returns `None` (no-op) when only the seed entry remains.
    pub fn go_back(&mut self) -> Option<&Location> {
        if !self.can_go_back() {
            return None;
        }

        let popped = self.history.pop()?;
        self.forward.push(popped);
        Some(self.current())
    }

    /// Restore the most recently backed-out location.
    /// Returns `None` (no-op) when the forward stack is empty.
    pub fn go_forward(&mut self) -> Option<&Location> {
        let next = self.forward.pop()?;
        self.history.push(next);
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Reset both stacks to the seed entry
    pub fn clear(&mut self) {
        self.history.clear();
        self.history.push(self.start.clone());
        self.forward.clear();
    }

    pub fn history_stack(&self) -> &[Location] {
        &self.history
    }

    pub fn forward_stack(&self) -> &[Location] {
        &self.forward
    }

    /// Last `limit` history entries, most recent first
    pub fn recent(&self, limit: usize) -> Vec<Location> {
        self.history.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
