//! Read-only view of a session for the presentation layer

use serde::Serialize;

use phoneframe_frame::{FrameLoadState, FrameMonitor};
use phoneframe_navigation::Location;
use phoneframe_session::Session;

use crate::config::Config;
use crate::devices::DevicePreset;
use crate::quick_links::QuickLink;

#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub session_id: String,
    /// Address bar contents and frame source
    pub current: Location,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Most recent first
    pub recent: Vec<Location>,
    pub quick_links: Vec<QuickLink>,
    pub devices: Vec<DevicePreset>,
    /// Selected preset
    pub device: DevicePreset,
    pub frame: FrameView,
    pub heartbeat_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub url: String,
    /// Echoed back by the page script with every report
    pub generation: u64,
    pub state: FrameLoadState,
    pub show_fallback: bool,
    pub retries: u32,
    pub retry_budget: u32,
}

/// Answer to a frame signal report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameVerdict {
    pub url: String,
    pub generation: u64,
    pub state: FrameLoadState,
    pub show_fallback: bool,
}

impl ShellView {
    pub fn build(session: &Session, config: &Config) -> Self {
        let navigation = session.navigation();

        Self {
            session_id: session.id.clone(),
            current: navigation.current().clone(),
            can_go_back: navigation.can_go_back(),
            can_go_forward: navigation.can_go_forward(),
            recent: navigation.history().recent(config.recent_history_limit),
            quick_links: config.quick_links.clone(),
            devices: config.device_presets.clone(),
            device: config.device_or_default(session.device()),
            frame: FrameView::from(session.frame()),
            heartbeat_interval_ms: config.heartbeat_interval_ms,
        }
    }
}

impl From<&FrameMonitor> for FrameView {
    fn from(monitor: &FrameMonitor) -> Self {
        Self {
            url: monitor.url().to_string(),
            generation: monitor.generation(),
            state: monitor.state(),
            show_fallback: monitor.shows_fallback(),
            retries: monitor.retries(),
            retry_budget: monitor.retry_budget(),
        }
    }
}

impl From<&FrameMonitor> for FrameVerdict {
    fn from(monitor: &FrameMonitor) -> Self {
        Self {
            url: monitor.url().to_string(),
            generation: monitor.generation(),
            state: monitor.state(),
            show_fallback: monitor.shows_fallback(),
        }
    }
}
