//! Application state management
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use phoneframe_core::{Config, Result, Shell};
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "phoneframe_session";

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    shell: Arc<Shell>,
}

/// The caller's session, resolved from the request cookie
pub struct SessionHandle {
    pub id: String,
    /// True when this request started the session
    pub created: bool,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let shell = Shell::new(config)?;

        Ok(Self {
            shell: Arc::new(shell),
        })
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Resume the session named by the request cookie, or start a new one
    pub fn session(&self, headers: &HeaderMap) -> SessionHandle {
        let cookie = session_cookie(headers);
        let (id, created) = self.shell.open_session(cookie.as_deref());
        SessionHandle { id, created }
    }
}

impl SessionHandle {
    /// Attach the session cookie to a response if the session is new
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.created {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, self.id
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

/// Session id from the `Cookie` header(s), if present
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("phoneframe_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
