//! Collaborators the URI builder depends on.
//!
//! The session subsystem and the configuration store live outside this
//! crate's core; the builder only sees these two traits.

use uuid::Uuid;

/// Supplies the session key appended to every generated URI.
pub trait KeyProvider: Send + Sync {
    fn make_key(&self) -> String;
}

/// Supplies the configured killboard host, if any.
pub trait HostProvider: Send + Sync {
    fn kb_host(&self) -> Option<String>;
}

/// A key fixed for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKey(String);

impl StaticKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A fresh random key (UUID v4, simple form).
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl KeyProvider for StaticKey {
    fn make_key(&self) -> String {
        self.0.clone()
    }
}

/// Host provider for deployments without a configured host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostProvider for NoHost {
    fn kb_host(&self) -> Option<String> {
        None
    }
}

impl HostProvider for Option<String> {
    fn kb_host(&self) -> Option<String> {
        self.clone().filter(|h| !h.is_empty())
    }
}
