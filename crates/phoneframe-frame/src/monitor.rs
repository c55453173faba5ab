//! Frame load monitor
//!
//! Tracks the load state of the location currently shown in the frame.
//! The only counter is the retry count: heartbeats that arrive before the
//! load is confirmed. Once it reaches the retry budget the frame is failed
//! and stays failed until the next navigation calls [`FrameMonitor::begin`].
//!
//! Each `begin` starts a new generation. Reports carrying an older
//! generation belong to a previous document, even when the url matches.

use crate::error::FrameError;
use crate::signal::{FrameSignal, LoadOutcome};
use crate::state::FrameLoadState;
use crate::Result;

pub const DEFAULT_RETRY_BUDGET: u32 = 5;

#[derive(Debug, Clone)]
pub struct FrameMonitor {
    /// Location the frame was pointed at
    url: String,
    /// Bumped by every `begin`
    generation: u64,
    state: FrameLoadState,
    /// Unconfirmed heartbeats since `begin`
    retries: u32,
    retry_budget: u32,
}

impl FrameMonitor {
    pub fn new(url: impl Into<String>, retry_budget: u32) -> Self {
        Self {
            url: url.into(),
            generation: 0,
            state: FrameLoadState::Loading,
            retries: 0,
            retry_budget: retry_budget.max(1),
        }
    }

    /// Start monitoring a new location
    pub fn begin(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.generation += 1;
        self.retries = 0;
        // Every state may restart loading
        let _ = self.transition_to(FrameLoadState::Loading);
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: FrameLoadState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(FrameError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        if self.state != new_state {
            tracing::debug!(
                url = %self.url,
                from = %self.state,
                to = %new_state,
                "Frame state transition"
            );
        }

        self.state = new_state;
        Ok(())
    }

    /// Apply a signal reported for `url` and return the resulting state.
    ///
    /// Signals for any other location, or for an older generation when the
    /// reporter knows it, are stale and ignored.
    pub fn observe(
        &mut self,
        url: &str,
        generation: Option<u64>,
        signal: FrameSignal,
    ) -> FrameLoadState {
        if url != self.url || generation.is_some_and(|g| g != self.generation) {
            tracing::debug!(
                expected = %self.url,
                reported = %url,
                generation = ?generation,
                signal = %signal,
                "Ignoring stale frame signal"
            );
            return self.state;
        }

        match signal.observation() {
            Some(LoadOutcome::Success) => {
                if self.state == FrameLoadState::Loading
                    && self.transition_to(FrameLoadState::Loaded).is_ok()
                {
                    self.retries = 0;
                }
            }
            Some(LoadOutcome::Failure) => {
                if self.transition_to(FrameLoadState::Failed).is_ok() {
                    tracing::info!(
                        url = %self.url,
                        signal = %signal,
                        "Embedded page failed to load"
                    );
                }
            }
            None => {}
        }

        if signal.is_heartbeat() && self.state == FrameLoadState::Loading {
            self.retries += 1;
            if self.retries >= self.retry_budget {
                tracing::info!(
                    url = %self.url,
                    retries = self.retries,
                    "Embedded page load timed out"
                );
                let _ = self.transition_to(FrameLoadState::Failed);
            }
        }

        self.state
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> FrameLoadState {
        self.state
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub fn shows_fallback(&self) -> bool {
        self.state.shows_fallback()
    }
}
