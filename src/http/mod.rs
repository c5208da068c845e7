//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs / request.rs (CORS policy, request ID)
//!     → handlers.rs (normalize, fetch upstream)
//!     → response.rs (relay status/body, add proxy headers)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{X_FROM_PROXY_ROUTE, X_PROXY_UPSTREAM};
pub use server::{AppState, HttpServer};
