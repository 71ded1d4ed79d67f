//! The page assembly queue.
//!
//! # Responsibilities
//! - Keep slots in registration order
//! - Attach before/behind callbacks and filters to a slot by id
//! - Render the whole queue into one document
//!
//! # Design Decisions
//! - Operations on an unknown slot id report `UnknownSlot`
//! - Priorities sort stably: equal priorities keep registration order
//! - `assemble` consumes the assembly, so a page renders exactly once

use std::time::Instant;

use crate::assembly::callback::{Callback, Page};
use crate::assembly::hooks::{AssemblyHooks, ASSEMBLE_EVENT};
use crate::assembly::menu::MenuItem;
use crate::assembly::slot::{Prioritized, Slot};
use crate::assembly::{AssemblyError, AssemblyResult};
use crate::observability::metrics;

/// Priority used by plugins that do not care about ordering.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Builds a page from an ordered queue of named slots.
pub struct PageAssembly<P> {
    page: P,
    queue: Vec<Slot<P>>,
    menu: Vec<MenuItem>,
    views: Vec<(String, Callback<P>)>,
    view: Option<String>,
}

impl<P> PageAssembly<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            queue: Vec::new(),
            menu: Vec::new(),
            views: Vec::new(),
            view: None,
        }
    }

    /// The page object component methods are called on.
    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Slot ids in render order.
    pub fn slot_ids(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|s| s.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.queue.iter().any(|s| s.id == id)
    }

    fn slot_mut(&mut self, id: &str) -> AssemblyResult<&mut Slot<P>> {
        self.queue
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AssemblyError::UnknownSlot(id.to_string()))
    }

    /// Queue a slot with an explicit primary callback.
    ///
    /// Re-queueing an existing id resets it in place.
    pub fn queue_with(&mut self, id: impl Into<String>, callback: Callback<P>) {
        let id = id.into();
        let slot = Slot::new(id.clone(), callback);
        match self.queue.iter().position(|s| s.id == id) {
            Some(i) => self.queue[i] = slot,
            None => self.queue.push(slot),
        }
    }

    /// Add a callback rendered before the slot's own content.
    pub fn add_before(&mut self, id: &str, callback: Callback<P>, priority: i32) -> AssemblyResult<()> {
        self.slot_mut(id)?.before.push(Prioritized {
            priority,
            item: callback,
        });
        Ok(())
    }

    /// Add a callback rendered after the slot's own content.
    pub fn add_behind(&mut self, id: &str, callback: Callback<P>, priority: i32) -> AssemblyResult<()> {
        self.slot_mut(id)?.behind.push(Prioritized {
            priority,
            item: callback,
        });
        Ok(())
    }

    /// Replace the slot's primary callback.
    pub fn replace(&mut self, id: &str, callback: Callback<P>) -> AssemblyResult<()> {
        self.slot_mut(id)?.callback = callback;
        Ok(())
    }

    /// Add a filter over the slot's primary output. Filters chain: each
    /// receives the previous one's result.
    pub fn filter<F>(&mut self, id: &str, filter: F, priority: i32) -> AssemblyResult<()>
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.slot_mut(id)?.filters.push(Prioritized {
            priority,
            item: std::sync::Arc::new(filter),
        });
        Ok(())
    }

    /// Remove a slot. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.queue.len();
        self.queue.retain(|s| s.id != id);
        before != self.queue.len()
    }

    pub fn add_menu_item(&mut self, item: MenuItem) {
        self.menu.push(item);
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Register the callback for a named view. A second registration
    /// for the same name replaces the first.
    pub fn add_view(&mut self, view: impl Into<String>, callback: Callback<P>) {
        let view = view.into();
        match self.views.iter_mut().find(|(name, _)| *name == view) {
            Some(entry) => entry.1 = callback,
            None => self.views.push((view, callback)),
        }
    }

    /// Names of all registered views.
    pub fn views(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|(name, _)| name.as_str())
    }

    /// The currently selected view.
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn set_view(&mut self, view: Option<String>) {
        self.view = view;
    }

    /// Render the selected view's callback; empty when no view is selected
    /// or the selection has no callback.
    pub fn render_view(&self) -> String {
        let Some(selected) = self.view.as_deref() else {
            return String::new();
        };
        self.views
            .iter()
            .find(|(name, _)| name == selected)
            .map(|(_, cb)| self.call(cb, selected))
            .unwrap_or_default()
    }

    fn call(&self, callback: &Callback<P>, slot: &str) -> String {
        match callback.invoke(self) {
            Some(html) => html,
            None => {
                tracing::warn!(
                    slot = %slot,
                    callback = %callback.describe(),
                    "Callback produced no output"
                );
                metrics::record_unresolved_callback(slot);
                String::new()
            }
        }
    }

    /// Fire [`ASSEMBLE_EVENT`] and render every slot in queue order.
    ///
    /// Per slot: before callbacks, primary output piped through the
    /// filters, then behind callbacks.
    pub fn assemble(mut self, hooks: &AssemblyHooks<P>) -> String {
        let start = Instant::now();
        hooks.call(ASSEMBLE_EVENT, &mut self);

        for slot in &mut self.queue {
            slot.sort();
        }

        let mut output = String::new();
        for slot in &self.queue {
            for entry in &slot.before {
                output.push_str(&self.call(&entry.item, &slot.id));
            }

            let mut text = self.call(&slot.callback, &slot.id);
            for filter in &slot.filters {
                text = (filter.item)(text);
            }
            output.push_str(&text);

            for entry in &slot.behind {
                output.push_str(&self.call(&entry.item, &slot.id));
            }
        }

        tracing::debug!(
            slots = self.queue.len(),
            bytes = output.len(),
            "Page assembled"
        );
        metrics::record_assembly(self.queue.len(), start);
        output
    }
}

impl<P: Page> PageAssembly<P> {
    /// Queue a slot rendered by the page's component of the same name.
    pub fn queue(&mut self, id: impl Into<String>) {
        let id = id.into();
        let callback = Callback::method(id.clone());
        self.queue_with(id, callback);
    }
}
