//! Killboard page core: URI routing and page assembly.

pub mod assembly;
pub mod config;
pub mod html;
pub mod http;
pub mod observability;
pub mod site;
pub mod uri;

pub use assembly::PageAssembly;
pub use config::KillboardConfig;
pub use http::HttpServer;
pub use uri::UriContext;
