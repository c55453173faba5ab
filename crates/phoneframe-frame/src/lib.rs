//! PhoneFrame Frame Load Monitor
//!
//! The embedded page is opaque except for the load/error signals the page
//! script reports. Those signals are reduced to an explicit contract:
//! a load is observed as a success, a failure, or unknown. Cross-origin read
//! denial is unknown and never an error.

mod error;
mod monitor;
mod signal;
mod state;

pub use error::FrameError;
pub use monitor::{FrameMonitor, DEFAULT_RETRY_BUDGET};
pub use signal::{ContentProbe, FrameSignal, LoadOutcome};
pub use state::FrameLoadState;

pub type Result<T> = std::result::Result<T, FrameError>;
