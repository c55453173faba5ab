//! PhoneFrame - HTTP application
//!
//! Serves the phone chrome page and the JSON API. The server owns all
//! navigation state; the page renders it and reports frame load signals.

mod commands;
mod page;
mod state;

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use phoneframe_core::Config;
use state::AppState;

/// How often idle sessions are swept
const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(page::index))
        .route("/navigate", post(page::navigate))
        .route("/back", post(page::go_back))
        .route("/forward", post(page::go_forward))
        .route("/home", post(page::go_home))
        .route("/history/clear", post(page::clear_history))
        .route("/device", post(page::select_device))
        // Session commands
        .route(
            "/api/session",
            get(commands::sessions::get_session).delete(commands::sessions::end_session),
        )
        // Navigation commands
        .route("/api/navigate", post(commands::navigation::navigate))
        .route("/api/back", post(commands::navigation::go_back))
        .route("/api/forward", post(commands::navigation::go_forward))
        .route("/api/home", post(commands::navigation::go_home))
        .route("/api/history/clear", post(commands::navigation::clear_history))
        // Settings commands
        .route("/api/device", post(commands::settings::select_device))
        // Frame monitor
        .route("/api/frame", post(commands::frame::report_frame_signal))
        // Diagnostics
        .route("/health", get(commands::diagnostics::health))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    // Initialize logging
    phoneframe_core::init_logging();

    let config = Config::from_env()?;
    let bind_address = config.bind_address.clone();
    let state = AppState::new(config)?;

    spawn_session_reaper(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "PhoneFrame started");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PhoneFrame stopped");
    Ok(())
}

fn spawn_session_reaper(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REAP_INTERVAL);
        loop {
            interval.tick().await;
            state.shell().reap_idle_sessions();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Config::default()).unwrap())
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn post_form(uri: &str, cookie: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// `name=value` part of the response's session cookie
    fn cookie_of(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn open(app: &Router) -> String {
        let response = send(app, get_with("/api/session", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        cookie_of(&response).unwrap()
    }

    #[tokio::test]
    async fn test_session_cookie_issued_once() {
        let app = app();
        let cookie = open(&app).await;
        assert!(cookie.starts_with("phoneframe_session="));

        let response = send(&app, get_with("/api/session", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_of(&response).is_none());

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["current"]["url"], "https://www.wikipedia.org");
        assert_eq!(body["data"]["can_go_back"], false);
    }

    #[tokio::test]
    async fn test_navigation_api_flow() {
        let app = app();
        let cookie = open(&app).await;

        let response = send(
            &app,
            post_json("/api/navigate", Some(&cookie), r#"{"input":"example.com"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["current"]["url"], "https://example.com");
        assert_eq!(body["data"]["current"]["label"], "example.com");
        assert_eq!(body["data"]["frame"]["state"], "loading");

        let response = send(&app, post_json("/api/back", Some(&cookie), "")).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["current"]["url"], "https://www.wikipedia.org");
        assert_eq!(body["data"]["can_go_forward"], true);

        let response = send(&app, post_json("/api/forward", Some(&cookie), "")).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["current"]["url"], "https://example.com");

        let response = send(&app, post_json("/api/home", Some(&cookie), "")).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["current"]["url"], "https://www.wikipedia.org");
        assert_eq!(body["data"]["recent"].as_array().unwrap().len(), 3);

        let response = send(&app, post_json("/api/history/clear", Some(&cookie), "")).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["recent"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["can_go_back"], false);
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let app = app();
        let cookie = open(&app).await;

        let response = send(
            &app,
            post_json("/api/navigate", Some(&cookie), r#"{"input":"ftp://files.test"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Invalid URL"));

        let body = body_json(send(&app, get_with("/api/session", Some(&cookie))).await).await;
        assert_eq!(body["data"]["current"]["url"], "https://www.wikipedia.org");
        assert_eq!(body["data"]["recent"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_device_selection() {
        let app = app();
        let cookie = open(&app).await;

        let response = send(
            &app,
            post_json("/api/device", Some(&cookie), r#"{"name":"Pixel 7"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["device"]["width"], 412);

        let response = send(
            &app,
            post_json("/api/device", Some(&cookie), r#"{"name":"Nokia 3310"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_page_renders_chrome() {
        let app = app();
        let response = send(&app, get_with("/", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_of(&response).is_some());

        let html = body_text(response).await;
        assert!(html.contains(r#"<iframe id="content" src="https://www.wikipedia.org""#));
        assert!(html.contains("Hacker News"));
        assert!(html.contains("window.PHONEFRAME"));
    }

    #[tokio::test]
    async fn test_page_form_actions() {
        let app = app();
        let cookie = open(&app).await;

        let response = send(&app, post_form("/navigate", &cookie, "input=example.com")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let html = body_text(send(&app, get_with("/", Some(&cookie))).await).await;
        assert!(html.contains(r#"src="https://example.com""#));

        let response = send(&app, post_form("/back", &cookie, "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, post_form("/device", &cookie, "name=iPhone+SE")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(send(&app, get_with("/", Some(&cookie))).await).await;
        assert!(html.contains(r#"src="https://www.wikipedia.org""#));
        assert!(html.contains(r#"style="width: 375px""#));
    }

    #[tokio::test]
    async fn test_page_invalid_input_keeps_typed_text() {
        let app = app();
        let cookie = open(&app).await;

        let form = post_form("/navigate", &cookie, "input=javascript%3Aalert(1)");
        let response = send(&app, form).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = body_text(response).await;
        assert!(html.contains(r#"class="error""#));
        assert!(html.contains(r#"value="javascript:alert(1)""#));
        assert!(html.contains(r#"src="https://www.wikipedia.org""#));
    }

    #[tokio::test]
    async fn test_frame_reports() {
        let app = app();

        let response = send(
            &app,
            post_json(
                "/api/frame",
                None,
                r#"{"url":"https://www.wikipedia.org","signal":"load:opaque"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let cookie = open(&app).await;
        let response = send(
            &app,
            post_json(
                "/api/frame",
                Some(&cookie),
                r#"{"url":"https://www.wikipedia.org","signal":"load:opaque"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["state"], "loaded");
        assert_eq!(body["data"]["show_fallback"], false);

        let response = send(
            &app,
            post_json(
                "/api/frame",
                Some(&cookie),
                r#"{"url":"https://www.wikipedia.org","signal":"error"}"#,
            ),
        )
        .await;
        assert_eq!(body_json(response).await["data"]["show_fallback"], true);

        let response = send(
            &app,
            post_json(
                "/api/frame",
                Some(&cookie),
                r#"{"url":"https://www.wikipedia.org","signal":"bogus"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_frame_report_from_previous_load_ignored() {
        let app = app();
        let cookie = open(&app).await;

        let response = send(&app, post_json("/api/home", Some(&cookie), "")).await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["frame"]["generation"], 1);

        let response = send(
            &app,
            post_json(
                "/api/frame",
                Some(&cookie),
                r#"{"url":"https://www.wikipedia.org","generation":0,"signal":"error"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["state"], "loading");
        assert_eq!(body["data"]["show_fallback"], false);

        let response = send(
            &app,
            post_json(
                "/api/frame",
                Some(&cookie),
                r#"{"url":"https://www.wikipedia.org","generation":1,"signal":"error"}"#,
            ),
        )
        .await;
        assert_eq!(body_json(response).await["data"]["show_fallback"], true);
    }

    #[tokio::test]
    async fn test_end_session() {
        let app = app();
        let cookie = open(&app).await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/session")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cookie_of(&response).unwrap(), "phoneframe_session=");

        let body = body_json(send(&app, get_with("/health", None)).await).await;
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["sessions"], 0);
    }
}
