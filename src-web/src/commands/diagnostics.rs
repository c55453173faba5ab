use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<CommandResult<HealthInfo>> {
    Json(CommandResult::ok(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.shell().session_manager().session_count(),
    }))
}
