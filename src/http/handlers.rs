//! Route handlers.
//!
//! Every search route runs the same pipeline:
//! normalize query → build GraphQL URL → fetch under deadline → relay.

use axum::{
    extract::{RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::catalog::{SearchParams, SearchQuery, Vendor};
use crate::http::request::request_id;
use crate::http::response::{relay, set_upstream_header, RelayHeaders};
use crate::http::server::AppState;
use crate::observability::metrics;

pub const IMAGE_ROUTE: &str = "/api/img";

const HEALTH_BANNER: &str = "Proxy OK (MANN + WIX): /api/mann and /api/wix ready";

pub async fn health() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], HEALTH_BANNER)
}

pub async fn search_mann(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = SearchQuery::parse(raw.as_deref());
    search(&state, Vendor::Mann, request_id(&headers), &query).await
}

pub async fn search_wix(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = SearchQuery::parse(raw.as_deref());
    search(&state, Vendor::Wix, request_id(&headers), &query).await
}

async fn search(state: &AppState, vendor: Vendor, request_id: &str, query: &SearchQuery) -> Response {
    let vendor_config = state.config.vendors.get(vendor);

    let response = match SearchParams::from_query(query, vendor_config.page_size) {
        Err(e) => {
            tracing::debug!(request_id = %request_id, vendor = %vendor, error = %e, "Rejected search");
            e.into_response()
        }
        Ok(params) => {
            tracing::info!(
                request_id = %request_id,
                vendor = %vendor,
                search = %params.search,
                page = params.current_page,
                filter = %params.filter_by,
                "Catalog search"
            );

            match state.upstream.fetch_catalog(vendor, vendor_config, &params).await {
                Ok(upstream) => relay(
                    upstream,
                    RelayHeaders {
                        upstream: vendor.upstream_label(),
                        route: vendor.route(),
                        cache_max_age_secs: vendor_config.cache_max_age_secs,
                        default_content_type: "application/json",
                    },
                ),
                Err(e) => {
                    tracing::error!(request_id = %request_id, vendor = %vendor, error = %e, "Upstream error");
                    let mut response = e.into_response();
                    set_upstream_header(&mut response, vendor.upstream_label());
                    response
                }
            }
        }
    };

    metrics::record_request(vendor.route(), response.status().as_u16());
    response
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageQuery {
    pub url: Option<String>,
}

impl ImageQuery {
    /// First `url` value wins; a URL is never joined with another.
    pub fn parse(raw: Option<&str>) -> Self {
        let url = form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned());
        Self { url }
    }
}

pub async fn proxy_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let request_id = request_id(&headers);
    let query = ImageQuery::parse(raw.as_deref());

    let response = match state.allowlist.check(query.url.as_deref()) {
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected image request");
            e.into_response()
        }
        Ok(url) => {
            let host = url.host_str().unwrap_or_default().to_string();
            match state
                .upstream
                .fetch_image(&url, state.config.images.max_bytes)
                .await
            {
                Ok(upstream) => relay(
                    upstream,
                    RelayHeaders {
                        upstream: &host,
                        route: IMAGE_ROUTE,
                        cache_max_age_secs: state.config.images.cache_max_age_secs,
                        default_content_type: "application/octet-stream",
                    },
                ),
                Err(e) => {
                    tracing::error!(request_id = %request_id, host = %host, error = %e, "Image fetch failed");
                    let mut response = e.into_response();
                    set_upstream_header(&mut response, &host);
                    response
                }
            }
        }
    };

    metrics::record_request(IMAGE_ROUTE, response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_query_takes_first_url() {
        let query = ImageQuery::parse(Some(
            "url=https%3A%2F%2Fcdn.mann-filter.com%2Fa.png&url=https%3A%2F%2Fevil.example%2F",
        ));
        assert_eq!(query.url.as_deref(), Some("https://cdn.mann-filter.com/a.png"));
        assert_eq!(ImageQuery::parse(None), ImageQuery::default());
    }
}
