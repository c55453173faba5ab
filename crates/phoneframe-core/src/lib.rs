//! PhoneFrame Core
//!
//! Central coordination layer for the phone chrome shell.
//! The server owns all state; the page is a renderer plus a load monitor.

mod config;
mod devices;
mod error;
mod quick_links;
mod shell;
mod view;

pub use config::Config;
pub use devices::DevicePreset;
pub use error::CoreError;
pub use quick_links::QuickLink;
pub use shell::Shell;
pub use view::{FrameVerdict, FrameView, ShellView};

// Re-export core components
pub use phoneframe_frame::{
    ContentProbe, FrameError, FrameLoadState, FrameMonitor, FrameSignal, LoadOutcome,
};
pub use phoneframe_navigation::{
    InputResolver, Location, NavigationController, NavigationError, NavigationHistory,
};
pub use phoneframe_session::{Session, SessionError, SessionManager, SessionSettings};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
