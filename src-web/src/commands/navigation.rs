//! Navigation and address bar commands

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::respond;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub input: String,
}

pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NavigateRequest>,
) -> Response {
    let session = state.session(&headers);
    session.attach(respond(
        state.shell().navigate(&session.id, &request.input),
    ))
}

pub async fn go_back(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(respond(state.shell().go_back(&session.id)))
}

pub async fn go_forward(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(respond(state.shell().go_forward(&session.id)))
}

pub async fn go_home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(respond(state.shell().go_home(&session.id)))
}

pub async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(respond(state.shell().clear_history(&session.id)))
}
