//! CORS policy.
//!
//! Development mirrors whatever origin the browser sends. Production only
//! answers for the configured frontend origins.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{Environment, ProxyConfig};
use crate::http::request::X_REQUEST_ID;
use crate::http::response::{X_FROM_PROXY_ROUTE, X_PROXY_UPSTREAM};

pub fn build_cors_layer(config: &ProxyConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([
            X_PROXY_UPSTREAM,
            X_FROM_PROXY_ROUTE,
            HeaderName::from_static(X_REQUEST_ID),
        ]);

    match config.environment {
        Environment::Development => layer.allow_origin(AllowOrigin::mirror_request()),
        Environment::Production => {
            let origins: Vec<HeaderValue> = config
                .cors
                .production_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            layer.allow_origin(origins)
        }
    }
}
