//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page sizes > 0)
//! - Check upstream endpoints and CORS origins are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::catalog::Vendor;
use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.upstream_ms == 0 {
        errors.push(ValidationError::new("timeouts.upstream_ms", "must be greater than 0"));
    }

    for vendor in Vendor::ALL {
        let vc = config.vendors.get(vendor);
        let prefix = format!("vendors.{}", vendor.key());

        if vc.page_size == 0 {
            errors.push(ValidationError::new(
                format!("{prefix}.page_size"),
                "must be greater than 0",
            ));
        }

        match Url::parse(&vc.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                format!("{prefix}.endpoint"),
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(format!("{prefix}.endpoint"), e.to_string())),
        }

        if HeaderValue::from_str(&vc.referer).is_err() {
            errors.push(ValidationError::new(
                format!("{prefix}.referer"),
                "not a valid header value",
            ));
        }
    }

    if config.images.allowed_hosts.iter().all(|h| h.trim().is_empty()) {
        errors.push(ValidationError::new("images.allowed_hosts", "must not be empty"));
    }
    if config.images.max_bytes == 0 {
        errors.push(ValidationError::new("images.max_bytes", "must be greater than 0"));
    }

    for origin in &config.cors.production_origins {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.production_origins",
                format!("'{}' is not a valid origin", origin),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.upstream_ms = 0;
        config.vendors.wix.page_size = 0;
        config.vendors.mann.endpoint = "ftp://mann.example/graphql".into();
        config.images.allowed_hosts.clear();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "timeouts.upstream_ms",
                "vendors.mann.endpoint",
                "vendors.wix.page_size",
                "images.allowed_hosts",
            ]
        );
    }

    #[test]
    fn test_rejects_bad_origin() {
        let mut config = ProxyConfig::default();
        config.cors.production_origins = vec!["https://ok.example".into(), "bad\norigin".into()];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cors.production_origins");
    }
}
