//! Named hooks fired during page assembly.
//!
//! Plugins register handlers by event name; the assembler fires
//! [`ASSEMBLE_EVENT`] with mutable access right before rendering so that a
//! plugin gets one last chance to rearrange the queue.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::assembly::page::PageAssembly;
use crate::assembly::AssemblyResult;

/// Fired by [`PageAssembly::assemble`] before the queue is rendered.
pub const ASSEMBLE_EVENT: &str = "pageAssembly_assemble";

pub type HookFn<P> = Arc<dyn Fn(&mut PageAssembly<P>) -> AssemblyResult<()> + Send + Sync>;

/// Registry of hook handlers, shared read-only across requests.
pub struct AssemblyHooks<P> {
    handlers: HashMap<String, Vec<HookFn<P>>>,
}

impl<P> AssemblyHooks<P> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler for `event`. Handlers run in registration order.
    pub fn register<F>(&mut self, event: impl Into<String>, handler: F)
    where
        F: Fn(&mut PageAssembly<P>) -> AssemblyResult<()> + Send + Sync + 'static,
    {
        self.handlers
            .entry(event.into())
            .or_default()
            .push(Arc::new(handler));
    }

    pub fn has(&self, event: &str) -> bool {
        self.handlers.get(event).is_some_and(|h| !h.is_empty())
    }

    /// Run every handler for `event`. A failing handler is logged and the
    /// rest still run. Returns the number of handlers that succeeded.
    pub fn call(&self, event: &str, assembly: &mut PageAssembly<P>) -> usize {
        let Some(handlers) = self.handlers.get(event) else {
            return 0;
        };

        let mut ok = 0;
        for handler in handlers {
            match handler(assembly) {
                Ok(()) => ok += 1,
                Err(e) => tracing::warn!(event = %event, error = %e, "Hook handler failed"),
            }
        }
        ok
    }
}

impl<P> Default for AssemblyHooks<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for AssemblyHooks<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self
            .handlers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        events.sort();
        f.debug_struct("AssemblyHooks").field("events", &events).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{AssemblyError, Callback};

    #[test]
    fn test_failing_handler_does_not_stop_others() {
        let mut hooks = AssemblyHooks::<()>::new();
        hooks.register(ASSEMBLE_EVENT, |page| page.add_before("missing", Callback::text("x"), 5));
        hooks.register(ASSEMBLE_EVENT, |page| {
            page.queue("late");
            Ok(())
        });

        let mut assembly = PageAssembly::new(());
        assert!(hooks.has(ASSEMBLE_EVENT));
        assert_eq!(hooks.call(ASSEMBLE_EVENT, &mut assembly), 1);
        assert!(assembly.contains("late"));
        assert_eq!(hooks.call("other", &mut assembly), 0);

        let err = assembly.add_behind("missing", Callback::text("x"), 5).unwrap_err();
        assert_eq!(err, AssemblyError::UnknownSlot("missing".to_string()));
    }
}
