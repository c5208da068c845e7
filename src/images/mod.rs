//! Image proxy subsystem: only hosts on the allow-list are fetched.

pub mod allowlist;

pub use allowlist::HostAllowlist;
