//! Spinner config file watcher.
//! Re-reads the TOML file on modification and hands the result to the main loop.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{info, warn};
use notify::{EventKind, RecursiveMode, Watcher};

use spinner_overlay::config::SpinnerConfiguration;

/// Watch `path` and send every successfully parsed configuration through `tx`.
/// Blocks the calling thread.
pub fn watch_config(path: &Path, tx: Sender<SpinnerConfiguration>) -> Result<(), String> {
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = notify_tx.send(event);
        }
    })
    .map_err(|e| format!("watcher: {e}"))?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| format!("watch {}: {e}", path.display()))?;

    info!("Watching config file {}", path.display());

    loop {
        match notify_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                return Err("watcher disconnected".to_string());
            }
        }

        // One save can produce several events; collapse the burst.
        while notify_rx.recv_timeout(Duration::from_millis(100)).is_ok() {}

        match SpinnerConfiguration::load(path) {
            Ok(config) => {
                info!("Reloaded spinner config from {}", path.display());
                if tx.send(config).is_err() {
                    return Err("channel closed".to_string());
                }
            }
            Err(e) => warn!("Ignoring config change: {e}"),
        }
    }
}
