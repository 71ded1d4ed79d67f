//! A named unit of page content and the callbacks attached to it.

use crate::assembly::callback::{Callback, FilterFn};

/// An entry ordered by priority; lower runs first.
#[derive(Clone)]
pub(crate) struct Prioritized<T> {
    pub priority: i32,
    pub item: T,
}

pub(crate) struct Slot<P> {
    pub id: String,
    pub callback: Callback<P>,
    pub before: Vec<Prioritized<Callback<P>>>,
    pub behind: Vec<Prioritized<Callback<P>>>,
    pub filters: Vec<Prioritized<FilterFn>>,
}

impl<P> Slot<P> {
    pub fn new(id: String, callback: Callback<P>) -> Self {
        Self {
            id,
            callback,
            before: Vec::new(),
            behind: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Order every list by priority. The sort is stable, so equal
    /// priorities keep registration order.
    pub fn sort(&mut self) {
        self.before.sort_by_key(|e| e.priority);
        self.behind.sort_by_key(|e| e.priority);
        self.filters.sort_by_key(|e| e.priority);
    }
}
