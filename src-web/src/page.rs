//! Phone chrome page
//!
//! Server-rendered from a [`ShellView`]. User actions are plain form posts
//! that redirect back to `/`; the embedded monitor script only reports
//! frame signals and toggles the fallback panel.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};

use phoneframe_core::ShellView;

use crate::state::AppState;

const PAGE_STYLE: &str = include_str!("../assets/phone.css");
const MONITOR_SCRIPT: &str = include_str!("../assets/monitor.js");

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct DeviceForm {
    pub name: String,
}

/// Values the monitor script reads from `window.PHONEFRAME`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    url: &'a str,
    generation: u64,
    state: &'a str,
    heartbeat_ms: u64,
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    let response = match state.shell().view(&session.id) {
        Ok(view) => Html(render_page(&view, None)).into_response(),
        Err(e) => error_response(e),
    };
    session.attach(response)
}

pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NavigateForm>,
) -> Response {
    let session = state.session(&headers);
    let response = match state.shell().navigate(&session.id, &form.input) {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) if e.is_user_error() => match state.shell().view(&session.id) {
            // Re-render with the rejected input still in the address bar
            Ok(view) => (
                StatusCode::BAD_REQUEST,
                Html(render_page(
                    &view,
                    Some((e.to_string().as_str(), form.input.as_str())),
                )),
            )
                .into_response(),
            Err(e) => error_response(e),
        },
        Err(e) => error_response(e),
    };
    session.attach(response)
}

pub async fn go_back(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(redirect_home(state.shell().go_back(&session.id)))
}

pub async fn go_forward(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(redirect_home(state.shell().go_forward(&session.id)))
}

pub async fn go_home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(redirect_home(state.shell().go_home(&session.id)))
}

pub async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.session(&headers);
    session.attach(redirect_home(state.shell().clear_history(&session.id)))
}

pub async fn select_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DeviceForm>,
) -> Response {
    let session = state.session(&headers);
    session.attach(redirect_home(
        state.shell().select_device(&session.id, &form.name),
    ))
}

fn redirect_home<T>(result: phoneframe_core::Result<T>) -> Response {
    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: phoneframe_core::CoreError) -> Response {
    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else if e.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %e, "Page request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, e.to_string()).into_response()
}

/// Render the page. `rejected` carries an error message and the input that
/// caused it.
pub fn render_page(view: &ShellView, rejected: Option<(&str, &str)>) -> String {
    let current = &view.current;
    let address = rejected
        .map(|(_, input)| input)
        .unwrap_or(current.url.as_str());

    let mut quick_links = String::new();
    for link in &view.quick_links {
        quick_links.push_str(&format!(
            r#"<form method="post" action="/navigate"><input type="hidden" name="input" value="{url}"><button type="submit" title="{url}"><span class="icon">{icon}</span>{name}</button></form>"#,
            url = escape_html(&link.url),
            icon = escape_html(&link.icon),
            name = escape_html(&link.display_name()),
        ));
    }

    let mut devices = String::new();
    for preset in &view.devices {
        let selected = if preset.name == view.device.name {
            " selected"
        } else {
            ""
        };
        devices.push_str(&format!(
            r#"<option value="{name}"{selected}>{name} ({width}px)</option>"#,
            name = escape_html(&preset.name),
            width = preset.width,
            selected = selected,
        ));
    }

    let mut recent = String::new();
    for location in &view.recent {
        recent.push_str(&format!(
            r#"<li><form method="post" action="/navigate"><input type="hidden" name="input" value="{url}"><button type="submit" title="{url}">{label}</button></form></li>"#,
            url = escape_html(&location.url),
            label = escape_html(&location.label),
        ));
    }

    let error_banner = match rejected {
        Some((message, _)) => format!(
            r#"<p class="error" role="alert">{}</p>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let script_config = ScriptConfig {
        url: &view.frame.url,
        generation: view.frame.generation,
        state: view.frame.state.as_str(),
        heartbeat_ms: view.heartbeat_interval_ms,
    };
    let script_config = serde_json::to_string(&script_config)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    let show_fallback = view.frame.show_fallback;

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{label} · PhoneFrame</title>
<style>{style}</style>
</head>
<body>
<header class="quick-links">{quick_links}</header>
<main class="layout">
<aside class="sidebar">
<form method="post" action="/device" class="devices">
<label for="device">Device</label>
<select id="device" name="name" onchange="this.form.submit()">{devices}</select>
<noscript><button type="submit">Apply</button></noscript>
</form>
<section class="recent">
<h2>Recent</h2>
<ol>{recent}</ol>
</section>
<form method="post" action="/history/clear"><button type="submit">Clear history</button></form>
</aside>
<section class="phone" style="width: {width}px">
<div class="notch"></div>
<nav class="toolbar">
<form method="post" action="/back"><button type="submit" title="Back"{back_disabled}>&#9664;</button></form>
<form method="post" action="/forward"><button type="submit" title="Forward"{forward_disabled}>&#9654;</button></form>
<form method="post" action="/home"><button type="submit" title="Home">&#8962;</button></form>
<form method="post" action="/navigate" class="address">
<input id="address" name="input" value="{address}" autocomplete="off" spellcheck="false" aria-label="Address">
<button type="submit">Go</button>
</form>
</nav>
{error_banner}
<div class="viewport">
<iframe id="content" src="{url}" data-url="{url}" title="{label}" referrerpolicy="no-referrer"{frame_hidden}></iframe>
<div id="fallback" class="fallback"{fallback_hidden}>
<p><strong>{label}</strong> can't be shown inside the frame.</p>
<a href="{url}" target="_blank" rel="noopener noreferrer">Open {label} in a new tab</a>
</div>
</div>
</section>
</main>
<script>window.PHONEFRAME = {script_config};</script>
<script>{script}</script>
</body>
</html>
"#,
        label = escape_html(&current.label),
        url = escape_html(&current.url),
        style = PAGE_STYLE,
        quick_links = quick_links,
        devices = devices,
        recent = recent,
        width = view.device.width,
        back_disabled = if view.can_go_back { "" } else { " disabled" },
        forward_disabled = if view.can_go_forward { "" } else { " disabled" },
        address = escape_html(address),
        error_banner = error_banner,
        frame_hidden = if show_fallback { " hidden" } else { "" },
        fallback_hidden = if show_fallback { "" } else { " hidden" },
        script_config = script_config,
        script = MONITOR_SCRIPT,
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
