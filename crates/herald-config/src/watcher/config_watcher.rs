use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use herald_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Signals when the settings file has been written.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// The file need not exist yet; creating it counts as a change.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if path.file_name().is_none() {
            return Err(ConfigError::WatchError(format!(
                "{} does not name a file",
                path.display()
            )));
        }
        if !path.exists() {
            warn!(path = %path.display(), "settings file missing, waiting for it to be created");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Send `()` on `tx` once the file has been quiet for the debounce
    /// period after a write. Returns when the underlying watcher stops.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        // Save-via-rename replaces the inode, so watch the directory.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(OsString::from).unwrap_or_default();

        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if touches_file(&event, &file_name) => {
                    let _ = raw_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("settings watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("failed to watch {}: {e}", dir.display())))?;
        info!(path = %self.path.display(), "watching settings file");

        while raw_rx.recv().await.is_some() {
            let quiet = sleep(DEBOUNCE);
            tokio::pin!(quiet);
            loop {
                tokio::select! {
                    _ = &mut quiet => break,
                    more = raw_rx.recv() => match more {
                        Some(()) => quiet.as_mut().reset(Instant::now() + DEBOUNCE),
                        None => return Ok(()),
                    },
                }
            }

            debug!("settings file settled, signalling reload");
            if tx.send(()).is_err() {
                debug!("nobody listening for settings reloads");
            }
        }

        Ok(())
    }
}

/// A create or modify event that names `file_name`.
pub(super) fn touches_file(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .filter_map(|p| p.file_name())
            .any(|name| name == file_name.as_os_str())
}
