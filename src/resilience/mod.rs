//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the per-fetch deadline)
//!     → On failure: surface the error to the caller, no retry
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a browser user re-submits a failed lookup

pub mod timeouts;
