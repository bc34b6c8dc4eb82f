use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response};
use axum::middleware::Next;

/// Fighter photos and flags are served by the backend or third parties, so
/// images may come from anywhere over https.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' https: data:; font-src 'self'; frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

pub fn security_headers<B>(mut response: Response<B>) -> Response<B> {
    let headers = response.headers_mut();

    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );

    response
}

pub async fn apply_security_headers(request: Request<Body>, next: Next) -> Response<Body> {
    let response = next.run(request).await;
    security_headers(response)
}
