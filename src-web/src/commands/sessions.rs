//! Session commands

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::Response;

use super::respond;
use crate::state::{expired_session_cookie, session_cookie, AppState};

pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(respond(state.shell().view(&session.id)))
}

pub async fn end_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = session_cookie(&headers).unwrap_or_default();
    let mut response = respond(state.shell().end_session(&session_id));
    response
        .headers_mut()
        .append(header::SET_COOKIE, expired_session_cookie());
    response
}
