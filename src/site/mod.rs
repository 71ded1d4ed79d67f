//! The board's generic page and its built-in plugins.
//!
//! # Data Flow
//! ```text
//! UriContext (parsed request)
//!     → page.rs BoardPage (header, content, menu, footer components)
//!     → plugins.rs hooks (navigation menu, footer filter)
//!     → PageAssembly::assemble → HTML
//! ```

pub mod page;
pub mod plugins;

pub use page::{assembly_for, BoardPage, STANDARD_SLOTS};
pub use plugins::default_hooks;
