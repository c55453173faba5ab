//! Device preset commands

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::respond;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeviceRequest {
    pub name: String,
}

pub async fn select_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DeviceRequest>,
) -> Response {
    let session = state.session(&headers);
    session.attach(respond(
        state.shell().select_device(&session.id, &request.name),
    ))
}
