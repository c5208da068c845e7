//! Outbound HTTP client for vendor catalogs and images.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE, REFERER, USER_AGENT},
    StatusCode,
};
use url::Url;

use crate::catalog::{SearchParams, Vendor};
use crate::config::VendorConfig;
use crate::error::ProxyError;
use crate::images::HostAllowlist;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;

/// The vendors reject requests without a browser-looking agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// A buffered upstream reply, ready to relay.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    /// Separate pool whose redirects are held to the image allow-list.
    image_client: reqwest::Client,
    deadline: Duration,
}

impl UpstreamClient {
    pub fn new(deadline: Duration, allowlist: &HostAllowlist) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder().build()?;
        let image_client = reqwest::Client::builder()
            .redirect(allowlist.redirect_policy())
            .build()?;
        Ok(Self {
            client,
            image_client,
            deadline,
        })
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run a catalog search against `vendor`.
    pub async fn fetch_catalog(
        &self,
        vendor: Vendor,
        config: &VendorConfig,
        params: &SearchParams,
    ) -> Result<UpstreamResponse, ProxyError> {
        let url = vendor.graphql_url(&config.endpoint, params)?;
        tracing::debug!(vendor = %vendor, url = %url, "Forwarding catalog search");

        let request = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, config.referer.as_str());

        self.send(vendor.key(), request, None).await
    }

    /// Fetch an image, refusing bodies larger than `max_bytes`.
    pub async fn fetch_image(
        &self,
        url: &Url,
        max_bytes: usize,
    ) -> Result<UpstreamResponse, ProxyError> {
        let referer = format!("{}/", url.origin().ascii_serialization());
        tracing::debug!(url = %url, "Forwarding image request");

        let request = self
            .image_client
            .get(url.clone())
            .header(ACCEPT, "image/*")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, referer);

        self.send("image", request, Some(max_bytes)).await
    }

    async fn send(
        &self,
        upstream: &'static str,
        request: reqwest::RequestBuilder,
        limit: Option<usize>,
    ) -> Result<UpstreamResponse, ProxyError> {
        let start = Instant::now();
        let result = with_deadline(self.deadline, async move {
            let mut response = request.send().await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let body = match limit {
                None => response.bytes().await?,
                Some(limit) => {
                    if response.content_length().is_some_and(|len| len > limit as u64) {
                        return Err(ProxyError::ImageTooLarge { limit });
                    }
                    let mut buf = Vec::new();
                    while let Some(chunk) = response.chunk().await? {
                        if buf.len() + chunk.len() > limit {
                            return Err(ProxyError::ImageTooLarge { limit });
                        }
                        buf.extend_from_slice(&chunk);
                    }
                    Bytes::from(buf)
                }
            };

            Ok(UpstreamResponse {
                status,
                content_type,
                body,
            })
        })
        .await;

        metrics::record_upstream(upstream, result.is_ok(), start);
        result
    }
}
