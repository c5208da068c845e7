//! Response relay.
//!
//! # Responsibilities
//! - Turn a buffered upstream reply into the client response
//! - Stamp the proxy headers (`X-Proxy-Upstream`, `X-From-Proxy-Route`, `Cache-Control`)
//!
//! # Design Decisions
//! - Status and body are relayed untouched, including upstream 4xx/5xx
//! - Only the content type is copied from upstream; other upstream headers are dropped

use axum::{
    body::Body,
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderName, HeaderValue,
    },
    response::Response,
};

use crate::upstream::UpstreamResponse;

pub const X_PROXY_UPSTREAM: HeaderName = HeaderName::from_static("x-proxy-upstream");
pub const X_FROM_PROXY_ROUTE: HeaderName = HeaderName::from_static("x-from-proxy-route");

/// Proxy headers added to a relayed response.
#[derive(Debug, Clone, Copy)]
pub struct RelayHeaders<'a> {
    pub upstream: &'a str,
    pub route: &'static str,
    pub cache_max_age_secs: u64,
    pub default_content_type: &'static str,
}

pub fn relay(upstream: UpstreamResponse, headers: RelayHeaders<'_>) -> Response {
    let content_type = upstream
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(headers.default_content_type));

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;

    let map = response.headers_mut();
    map.insert(CONTENT_TYPE, content_type);
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", headers.cache_max_age_secs)) {
        map.insert(CACHE_CONTROL, value);
    }
    map.insert(X_FROM_PROXY_ROUTE, HeaderValue::from_static(headers.route));
    set_upstream_header(&mut response, headers.upstream);

    response
}

/// Tag any response (including errors) with the upstream it concerns.
pub fn set_upstream_header(response: &mut Response, upstream: &str) {
    if let Ok(value) = HeaderValue::from_str(upstream) {
        response.headers_mut().insert(X_PROXY_UPSTREAM, value);
    }
}
