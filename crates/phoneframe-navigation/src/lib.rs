//! PhoneFrame Navigation
//!
//! Address bar input resolution and the back/forward history model:
//! - Typed input → absolute `http(s)` [`Location`] (scheme auto-prepended)
//! - History stack (oldest first, current on top)
//! - Forward stack (most recently backed-out location on top)
//!
//! Any explicit navigation clears the forward stack.

mod controller;
mod error;
mod history;
mod input;
mod location;

pub use controller::NavigationController;
pub use error::NavigationError;
pub use history::NavigationHistory;
pub use input::InputResolver;
pub use location::Location;

pub type Result<T> = std::result::Result<T, NavigationError>;
