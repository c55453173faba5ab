//! PhoneFrame Session Management
//!
//! - A Session is the explicit, owned state of one user: navigation stacks,
//!   frame monitor and selected device preset
//! - Sessions live in memory only and end on request or after idling
//! - Each session is mutated under the registry lock, one transition at a time

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::{SessionManager, SessionSettings};
pub use session::Session;

pub type Result<T> = std::result::Result<T, SessionError>;
