//! Catalog search domain.
//!
//! # Data Flow
//! ```text
//! ?q=..&page=..&filterBy=..
//!     → params.rs (normalize search, page, filter)
//!     → vendor.rs (fixed GraphQL document + endpoint)
//!     → GET endpoint?query=..&variables=..
//! ```

pub mod filter;
pub mod params;
pub mod vendor;

pub use filter::FilterKind;
pub use params::{normalize_search, parse_page, SearchParams, SearchQuery};
pub use vendor::Vendor;
