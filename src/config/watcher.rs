//! Rule file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::resolver::Resolver;

/// Watches the rule file and emits a freshly compiled resolver on every
/// successful reload. A reload that fails to load or validate is logged and
/// dropped, so the current snapshot keeps serving.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Resolver>,
}

impl ConfigWatcher {
    /// Create a watcher and the receiver for resolver updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Resolver>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread. The returned watcher must be
    /// kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Rule file change detected, reloading");
                        match load_config(&path) {
                            Ok(resolver) => {
                                let _ = tx.send(resolver);
                            }
                            Err(e) => {
                                tracing::error!(
                                    error = %e,
                                    "Reload rejected, keeping current rule set"
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

        tracing::info!(path = ?self.path, "Rule file watcher started");
        Ok(watcher)
    }
}
