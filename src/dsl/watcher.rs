//! Document file watcher.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::dsl::config::Config as Document;
use crate::dsl::loader::{load_document, LoadError};

/// The outcome of reloading a changed document.
pub type Reload = Result<Document, LoadError>;

/// Monitors one document and reloads it on every change.
pub struct DocumentWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Reload>,
}

impl DocumentWatcher {
    /// Returns the watcher and a receiver for reload outcomes.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Reload>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching on notify's background thread. Dropping the returned
    /// watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = %path.display(), "document change detected, reloading");
                        let reload = load_document(&path);
                        if let Err(e) = &reload {
                            tracing::debug!(error = %e, "reload failed");
                        }
                        let _ = tx.send(reload);
                    }
                }
                Err(e) => tracing::error!("watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "document watcher started");
        Ok(watcher)
    }
}
