//! Frame load reports from the page script
//!
//! Only existing sessions are updated; a report without a live session
//! is answered with 404 and never starts one.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::respond;
use crate::state::{session_cookie, AppState};

#[derive(Debug, Deserialize)]
pub struct FrameReport {
    /// Location the frame was pointed at when the signal fired
    pub url: String,
    /// Load generation the page was rendered for. Clients that omit it
    /// are matched on url alone.
    #[serde(default)]
    pub generation: Option<u64>,
    /// `load:<probe>`, `heartbeat:<probe>` or `error`
    pub signal: String,
}

pub async fn report_frame_signal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(report): Json<FrameReport>,
) -> Response {
    let session_id = session_cookie(&headers).unwrap_or_default();
    respond(state.shell().report_frame_signal(
        &session_id,
        &report.url,
        report.generation,
        &report.signal,
    ))
}
