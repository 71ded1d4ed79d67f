//! Killboard URI subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path-info, query string)
//!     → parser.rs (ordered (name, value, positional) list)
//!     → context.rs (per-request UriContext: args + resolved host root)
//!     → get_arg() lookups by name or position
//!
//! Outbound links:
//!     [Param] → context.rs build()/page()
//!     → providers.rs (session key, configured host)
//!     → path-info or query-string URI
//! ```
//!
//! # Design Decisions
//! - State is per request; nothing is cached across requests
//! - Both URL styles share one parameter model so lookups are style-invariant
//! - Old links are reported as a redirect, never followed up with output

pub mod context;
pub mod param;
pub mod parser;
pub mod providers;

use thiserror::Error;

pub use context::{Origin, UriContext, UriSettings, SESSION_KEY};
pub use param::{ArgValue, IntoParams, Param, ParamValue, ACTION};
pub use parser::{parse_args, StaleLink, DEFAULT_PAGE};
pub use providers::{HostProvider, KeyProvider, NoHost, StaticKey};

/// Errors raised while interpreting a request URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// The link mixes path-info with a query `a`; send the client here instead.
    #[error("stale link, redirect required to {location}")]
    RedirectRequired { location: String },
}

/// Result type for URI operations.
pub type UriResult<T> = Result<T, UriError>;
