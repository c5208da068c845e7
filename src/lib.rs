//! Filter cross-reference proxy library.
//!
//! Relays browser catalog searches to the MANN and WIX GraphQL backends and
//! proxies allow-listed vendor images, adding CORS headers on the way out.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod images;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
