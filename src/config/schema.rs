//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::catalog::Vendor;

/// Root configuration for the catalog proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Deployment environment (drives CORS policy).
    pub environment: Environment,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Per-vendor upstream settings.
    pub vendors: VendorsConfig,

    /// Image proxy settings.
    pub images: ImageConfig,

    /// CORS settings.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Apply `PORT`, `PROXY_ENV` and `CORS_ORIGINS` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            let host = self
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.listener.bind_address = format!("{}:{}", host, port.trim());
        }

        if let Some(env) = lookup("PROXY_ENV") {
            self.environment = match env.trim().to_ascii_lowercase().as_str() {
                "production" | "prod" => Environment::Production,
                _ => Environment::Development,
            };
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors.production_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Deadline for a single upstream fetch in milliseconds.
    pub upstream_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_ms: 12_000,
        }
    }
}

/// Upstream settings for both catalog vendors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VendorsConfig {
    pub mann: VendorConfig,
    pub wix: VendorConfig,
}

impl VendorsConfig {
    pub fn get(&self, vendor: Vendor) -> &VendorConfig {
        match vendor {
            Vendor::Mann => &self.mann,
            Vendor::Wix => &self.wix,
        }
    }
}

impl Default for VendorsConfig {
    fn default() -> Self {
        Self {
            mann: VendorConfig::defaults_for(Vendor::Mann),
            wix: VendorConfig::defaults_for(Vendor::Wix),
        }
    }
}

/// A single vendor's GraphQL catalog endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendorConfig {
    /// GraphQL GET endpoint.
    pub endpoint: String,

    /// Referer sent upstream.
    pub referer: String,

    /// Fixed page size; callers cannot override it.
    pub page_size: u32,

    /// `max-age` advertised on relayed responses.
    pub cache_max_age_secs: u64,
}

impl VendorConfig {
    pub fn defaults_for(vendor: Vendor) -> Self {
        match vendor {
            Vendor::Mann => Self {
                endpoint: "https://www.mann-filter.com/api/graphql/catalog-prod".to_string(),
                referer: "https://www.mann-filter.com/".to_string(),
                page_size: 100,
                cache_max_age_secs: 100,
            },
            Vendor::Wix => Self {
                endpoint: "https://www.wixfilters.com/api/graphql/catalog-prod".to_string(),
                referer: "https://www.wixfilters.com/".to_string(),
                page_size: 30,
                cache_max_age_secs: 30,
            },
        }
    }
}

/// Image proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Hostnames (and their subdomains) images may be fetched from.
    pub allowed_hosts: Vec<String>,

    /// `max-age` advertised on relayed images.
    pub cache_max_age_secs: u64,

    /// Largest image body relayed, in bytes.
    pub max_bytes: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["mann-filter.com".to_string(), "wixfilters.com".to_string()],
            cache_max_age_secs: 86_400,
            max_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed in production. Development mirrors any origin.
    pub production_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            production_origins: vec!["https://presupuestador-boxes.vercel.app".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
