//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] phoneframe_navigation::NavigationError),
}
