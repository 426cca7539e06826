//! HTTP surface: static files, the health probe and the single-page shell.

use std::any::Any;
use std::path::Path;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

pub const SERVICE_NAME: &str = "XCAOX Maps";

/// Tiles are immutable once published: 30 days
pub const TILE_CACHE_CONTROL: &str = "public, max-age=2592000";

/// Other static assets: 7 days
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=604800";

const CACHED_EXTENSIONS: &[&str] = &[
    "js", "css", "png", "jpg", "jpeg", "gif", "ico", "svg", "woff", "woff2", "ttf", "eot",
];

/// The full application rooted at `root`
pub fn app(root: &Path) -> Router {
    let shell = ServeFile::new(root.join("index.html"));
    let files = ServeDir::new(root).fallback(shell);

    with_middleware(
        Router::new()
            .route("/health", get(health))
            .fallback_service(files),
    )
}

/// Wraps `router` in the cache, panic and security-header layers
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(middleware::from_fn(cache_headers))
        .layer(middleware::from_fn(log_request))
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "service": SERVICE_NAME,
    }))
}

/// Cache-Control value for a request path, if it names a cacheable file
pub fn cache_policy(path: &str) -> Option<&'static str> {
    if path.contains("/assets/tiles/") {
        return Some(TILE_CACHE_CONTROL);
    }
    let extension = Path::new(path).extension()?.to_str()?;
    CACHED_EXTENSIONS
        .contains(&extension)
        .then_some(ASSET_CACHE_CONTROL)
}

async fn cache_headers(request: Request, next: Next) -> Response {
    let policy = cache_policy(request.uri().path());
    let mut response = next.run(request).await;

    let Some(policy) = policy else {
        return response;
    };
    // a missing asset falls through to the HTML shell, which must not be cached
    let is_shell = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));
    if response.status().is_success() && !is_shell {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(policy));
    }
    response
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    log::debug!("{method} {path} -> {}", response.status());
    response
}

fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    log::error!("request handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
