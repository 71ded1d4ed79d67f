//! Render callbacks and their three addressing forms.
//!
//! # Design Decisions
//! - Callbacks are resolved when they are registered, never looked up by
//!   string at render time
//! - A callback that yields `None`, or a method name the page does not
//!   provide, renders as empty text

use std::fmt;
use std::sync::Arc;

use crate::assembly::page::PageAssembly;

/// A component method on the page object.
pub type MethodFn<P> = fn(&P, &PageAssembly<P>) -> Option<String>;

/// A free function or closure contributed by a plugin.
pub type FunctionFn<P> = Arc<dyn Fn(&PageAssembly<P>) -> Option<String> + Send + Sync>;

/// A post-processing filter over a slot's rendered text.
pub type FilterFn = Arc<dyn Fn(String) -> String + Send + Sync>;

/// A page object whose components are addressed by slot id.
///
/// `queue("summary")` binds the slot to whatever `component("summary")`
/// returns.
pub trait Page: Sized {
    fn component(id: &str) -> Option<MethodFn<Self>>;
}

/// A page without component methods; every slot has to be filled through
/// [`PageAssembly::replace`].
impl Page for () {
    fn component(_id: &str) -> Option<MethodFn<Self>> {
        None
    }
}

/// A function bound to a type, labelled with its path for diagnostics.
pub struct StaticFn<P> {
    pub path: &'static str,
    pub func: fn(&PageAssembly<P>) -> Option<String>,
}

impl<P> Clone for StaticFn<P> {
    fn clone(&self) -> Self {
        Self {
            path: self.path,
            func: self.func,
        }
    }
}

/// A render callback.
pub enum Callback<P> {
    /// A component method of the page object. `func` is `None` when the page
    /// has no component of that name.
    Method {
        name: String,
        func: Option<MethodFn<P>>,
    },
    /// A free function or closure.
    Function(FunctionFn<P>),
    /// A type-bound function.
    Static(StaticFn<P>),
}

impl<P: Page> Callback<P> {
    /// Resolve a page component by name.
    pub fn method(name: impl Into<String>) -> Self {
        let name = name.into();
        let func = P::component(&name);
        Callback::Method { name, func }
    }
}

impl<P> Callback<P> {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&PageAssembly<P>) -> Option<String> + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(f))
    }

    pub fn static_fn(path: &'static str, func: fn(&PageAssembly<P>) -> Option<String>) -> Self {
        Callback::Static(StaticFn { path, func })
    }

    /// A fixed piece of markup.
    pub fn text(text: impl Into<String>) -> Self
    where
        P: 'static,
    {
        let text = text.into();
        Callback::function(move |_| Some(text.clone()))
    }

    /// Invoke the callback. `None` means it could not produce output.
    pub(crate) fn invoke(&self, assembly: &PageAssembly<P>) -> Option<String> {
        match self {
            Callback::Method { func, .. } => func.and_then(|f| f(assembly.page(), assembly)),
            Callback::Function(f) => f(assembly),
            Callback::Static(s) => (s.func)(assembly),
        }
    }

    /// Label used in log messages.
    pub fn describe(&self) -> String {
        match self {
            Callback::Method { name, .. } => format!("this->{}", name),
            Callback::Function(_) => "<function>".to_string(),
            Callback::Static(s) => s.path.to_string(),
        }
    }
}

impl<P> Clone for Callback<P> {
    fn clone(&self) -> Self {
        match self {
            Callback::Method { name, func } => Callback::Method {
                name: name.clone(),
                func: *func,
            },
            Callback::Function(f) => Callback::Function(f.clone()),
            Callback::Static(s) => Callback::Static(s.clone()),
        }
    }
}

impl<P> fmt::Debug for Callback<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Method { name, func } => f
                .debug_struct("Method")
                .field("name", name)
                .field("resolved", &func.is_some())
                .finish(),
            Callback::Function(_) => f.write_str("Function"),
            Callback::Static(s) => f.debug_tuple("Static").field(&s.path).finish(),
        }
    }
}
