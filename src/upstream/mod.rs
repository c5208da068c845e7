//! Upstream fetch subsystem.
//!
//! One pooled `reqwest` client is shared by every route. Each call is a
//! single GET under the configured deadline; the reply is buffered and
//! relayed as-is, including non-2xx statuses.

pub mod client;

pub use client::{UpstreamClient, UpstreamResponse};
