//! Frame Load State Machine
//!
//! ```text
//! Loading ──load confirmed──▶ Loaded
//!    │                          │
//!    └──error / timeout──▶ Failed ◀──error──┘
//!
//! any state ──navigation──▶ Loading
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameLoadState {
    /// Navigation started, load not yet confirmed
    Loading,
    /// Load event observed for the current location
    Loaded,
    /// Load failed or timed out; fallback panel is shown
    Failed,
}

impl FrameLoadState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: FrameLoadState) -> bool {
        match (self, target) {
            (FrameLoadState::Loading, FrameLoadState::Loaded) => true,
            (FrameLoadState::Loading, FrameLoadState::Failed) => true,
            // An explicit error after the load event still fails the frame
            (FrameLoadState::Loaded, FrameLoadState::Failed) => true,
            // A new navigation always restarts monitoring
            (_, FrameLoadState::Loading) => true,
            (a, b) if *a == b => true,
            // Failed is terminal until the next navigation
            _ => false,
        }
    }

    /// Returns true if the fallback panel should replace the frame
    pub fn shows_fallback(&self) -> bool {
        matches!(self, FrameLoadState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameLoadState::Loading => "loading",
            FrameLoadState::Loaded => "loaded",
            FrameLoadState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FrameLoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FrameLoadState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loading" => Ok(FrameLoadState::Loading),
            "loaded" => Ok(FrameLoadState::Loaded),
            "failed" => Ok(FrameLoadState::Failed),
            _ => Err(format!("Unknown frame state: {}", s)),
        }
    }
}
