//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] phoneframe_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] phoneframe_navigation::NavigationError),

    #[error("Frame error: {0}")]
    Frame(#[from] phoneframe_frame::FrameError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown device preset: {0}")]
    UnknownDevice(String),
}

impl CoreError {
    /// True when the error was caused by user input rather than the server
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::Navigation(_)
                | CoreError::Session(phoneframe_session::SessionError::Navigation(_))
                | CoreError::Frame(_)
                | CoreError::UnknownDevice(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::Session(phoneframe_session::SessionError::NotFound(_))
        )
    }
}
