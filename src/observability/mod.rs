//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! uri, assembly, http
//!     → logging.rs (structured tracing events, request id in spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
