//! JSON API
//!
//! These handlers bridge the page script and other clients to the core.
//! Every response uses the `{ success, data, error }` envelope.

pub mod diagnostics;
pub mod frame;
pub mod navigation;
pub mod sessions;
pub mod settings;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Turn a core result into an HTTP response
pub fn respond<T: Serialize>(result: phoneframe_core::Result<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(CommandResult::ok(data))).into_response(),
        Err(e) => {
            let status = if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else if e.is_user_error() {
                StatusCode::BAD_REQUEST
            } else {
                tracing::error!(error = %e, "Command failed");
                StatusCode::INTERNAL_SERVER_ERROR
            };

            (status, Json(CommandResult::<T>::err(e.to_string()))).into_response()
        }
    }
}
