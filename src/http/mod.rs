//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (script name / path-info split, query, host)
//!     → uri::UriContext (parse, or redirect for stale links)
//!     → site + assembly (render the page)
//!     → response.rs (HTML or 302)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestTarget, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
