//! Hostname allow-list for the image proxy.

use reqwest::redirect::Policy;
use url::Url;

use crate::error::ProxyError;

/// Redirect hops followed for an image before giving up.
const MAX_IMAGE_REDIRECTS: usize = 5;

/// Raised by the image redirect policy when a hop leaves the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("redirect to host not allowed: {host}")]
pub struct BlockedRedirect {
    pub host: String,
}

/// Hosts (and their subdomains) images may be fetched from.
#[derive(Debug, Clone)]
pub struct HostAllowlist {
    hosts: Vec<String>,
}

impl HostAllowlist {
    /// Entries are lower-cased; a leading dot is ignored.
    pub fn from_config(hosts: &[String]) -> Self {
        let hosts = hosts
            .iter()
            .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { hosts }
    }

    pub fn is_allowed(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.hosts.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Scheme and host check applied to every URL fetched, including redirect hops.
    pub fn permits(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| self.is_allowed(host))
    }

    /// Redirect policy that only follows hops back onto the allow-list.
    pub fn redirect_policy(&self) -> Policy {
        let allowlist = self.clone();
        Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_IMAGE_REDIRECTS {
                return attempt.error("too many redirects");
            }
            if allowlist.permits(attempt.url()) {
                return attempt.follow();
            }
            let host = attempt.url().host_str().unwrap_or_default().to_string();
            attempt.error(BlockedRedirect { host })
        })
    }

    /// Validate the raw `url` query parameter.
    pub fn check(&self, raw: Option<&str>) -> Result<Url, ProxyError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ProxyError::MissingImageUrl);
        }

        let url = Url::parse(raw).map_err(|e| ProxyError::InvalidImageUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidImageUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ProxyError::InvalidImageUrl("missing host".to_string()))?;
        if !self.is_allowed(host) {
            return Err(ProxyError::HostNotAllowed(host.to_string()));
        }

        Ok(url)
    }
}
