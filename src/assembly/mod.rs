//! Page assembly subsystem.
//!
//! # Data Flow
//! ```text
//! Request setup:
//!     page handler → queue(id) per slot (document order)
//!     plugins      → add_before / add_behind / replace / filter / delete
//!                  → add_menu_item / add_view
//!
//! Rendering (once):
//!     assemble()
//!     → hooks.rs fires pageAssembly_assemble (last queue changes)
//!     → per slot: before* → primary → filters → behind*
//!     → one HTML string
//! ```
//!
//! # Design Decisions
//! - Callbacks are a tagged union resolved at registration
//! - A broken callback renders as empty text rather than failing the page
//! - Unknown slot ids are reported to the caller

pub mod callback;
pub mod hooks;
pub mod menu;
pub mod page;
mod slot;

use thiserror::Error;

pub use callback::{Callback, FilterFn, FunctionFn, MethodFn, Page, StaticFn};
pub use hooks::{AssemblyHooks, ASSEMBLE_EVENT};
pub use menu::{MenuItem, MenuItemKind};
pub use page::{PageAssembly, DEFAULT_PRIORITY};

/// Errors raised while building the assembly queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// No slot with this id has been queued.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
}

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
