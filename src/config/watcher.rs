//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::KillboardConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<KillboardConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<KillboardConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(new_config) => {
                                forward_update(&tx, new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Hand a validated configuration to the applier. Returns false when the
/// receiving side is gone and the reload was discarded.
fn forward_update(tx: &mpsc::UnboundedSender<KillboardConfig>, config: KillboardConfig) -> bool {
    if tx.send(config).is_err() {
        tracing::warn!("Config update receiver dropped; reload discarded");
        return false;
    }
    true
}

/// Apply reloaded configurations to the shared snapshot until the sender
/// side is dropped.
///
/// Listener settings are bound at startup and are not affected.
pub async fn apply_updates(
    mut updates: mpsc::UnboundedReceiver<KillboardConfig>,
    current: Arc<ArcSwap<KillboardConfig>>,
) {
    while let Some(config) = updates.recv().await {
        tracing::info!(
            path_info = config.site.path_info,
            kb_host = ?config.site.kb_host,
            "Configuration reloaded"
        );
        current.store(Arc::new(config));
    }
}
