use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Stamped on every response, including the JavaScript documentation UIs.
const SECURITY_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "same-origin"),
];

/// Policy for the server-rendered admin pages: plain forms that only post
/// back to their own origin, with no scripts.
pub const PAGE_CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; script-src 'none'; form-action 'self'; frame-ancestors 'none'";

fn stamp(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
    // Handlers that set their own value win.
    if !headers.contains_key(&name) {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    for (name, value) in SECURITY_HEADERS {
        stamp(response.headers_mut(), name, value);
    }
    response
}

/// Adds [`PAGE_CONTENT_SECURITY_POLICY`]. Layer it on HTML page routers only.
pub async fn page_security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    stamp(
        response.headers_mut(),
        header::CONTENT_SECURITY_POLICY,
        PAGE_CONTENT_SECURITY_POLICY,
    );
    response
}
