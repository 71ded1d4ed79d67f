//! Killboard front end.
//!
//! Serves every board page through the URI router and the page assembler.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::request (path-info, query)
//!                                          │
//!                                          ▼
//!                                     uri::UriContext ──── stale link ──▶ 302
//!                                          │
//!                                          ▼
//!                                   site::BoardPage + assembly::PageAssembly
//!                                          │  hooks: pageAssembly_assemble
//!                                          ▼
//!     ◀────────────── HTML ◀───────── assemble()
//!
//!     Cross-cutting: config (TOML + hot reload), observability (tracing, metrics)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use killboard_core::config::{load_config, watcher, KillboardConfig};
use killboard_core::http::{AppState, HttpServer};
use killboard_core::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "killboard")]
#[command(about = "Killboard front end", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => KillboardConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("killboard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        path_info = config.site.path_info,
        kb_host = ?config.site.kb_host,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let state = AppState::new(config);

    // Keep the watcher alive for the lifetime of the server.
    let _watcher = match &cli.config {
        Some(path) => {
            let (config_watcher, updates) = watcher::ConfigWatcher::new(path);
            tokio::spawn(watcher::apply_updates(updates, state.config.clone()));
            Some(config_watcher.run()?)
        }
        None => None,
    };

    let server = HttpServer::with_state(state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
