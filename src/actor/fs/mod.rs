//! FileSystem Actor
//!
//! Watches the theme source tree and turns raw notify events into debounced
//! rebuild requests for the BuilderActor. The watcher is armed before the
//! initial build finishes, so edits made during that build are buffered
//! instead of lost.
//!
//! ```text
//! notify thread → async bridge → Debouncer → BuilderMsg::Rebuild
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::BuilderMsg;
use crate::config::Config;

mod debouncer;

#[cfg(test)]
mod tests;

use debouncer::Debouncer;

pub struct FsActor {
    /// Raw events from the notify callback (std channel, notify is sync)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Dropping the watcher stops event delivery, so it lives here
    watcher: RecommendedWatcher,
    builder_tx: mpsc::Sender<BuilderMsg>,
    debouncer: Debouncer,
    config: Arc<Config>,
}

impl FsActor {
    /// Create the actor and start watching the theme source tree immediately.
    pub fn new(config: Arc<Config>, builder_tx: mpsc::Sender<BuilderMsg>) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        watcher.watch(&config.build.source, RecursiveMode::Recursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            builder_tx,
            debouncer: Debouncer::new(),
            config,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let builder_tx = self.builder_tx.clone();
        let config = Arc::clone(&self.config);
        let mut debouncer = self.debouncer;
        let mut event_rx = bridge_notify(self.notify_rx);
        let _watcher = self.watcher;

        loop {
            tokio::select! {
                biased;
                Some(event) = event_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    if flush_pending(&mut debouncer, &builder_tx, &config).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Pump the std-channel notify events onto an async channel from a dedicated
/// thread; notify has no async delivery of its own.
fn bridge_notify(
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
) -> mpsc::Receiver<notify::Event> {
    let (tx, rx) = mpsc::channel::<notify::Event>(64);

    std::thread::spawn(move || {
        while let Ok(result) = notify_rx.recv() {
            match result {
                Ok(event) => {
                    if tx.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(e) => crate::log!("watch"; "notify error: {}", e),
            }
        }
    });

    rx
}

/// Hand the debounced change set to the builder.
///
/// Returns `Err(())` when the BuilderActor is gone.
async fn flush_pending(
    debouncer: &mut Debouncer,
    builder_tx: &mpsc::Sender<BuilderMsg>,
    config: &Config,
) -> Result<(), ()> {
    // Buffer everything until the initial build has finished; checking
    // before take keeps the events queued rather than discarded
    if !crate::core::is_serving() {
        return Ok(());
    }

    let Some(pending) = debouncer.take_if_ready() else {
        return Ok(());
    };

    // The bundler writes into dist while we watch the source tree; any dist
    // path that slips through the watcher must not retrigger a build
    let changed_paths: Vec<PathBuf> = pending
        .into_keys()
        .filter(|path| !path.starts_with(config.dist_dir()))
        .collect();

    if changed_paths.is_empty() {
        return Ok(());
    }

    crate::debug!("watch"; "{} file(s) changed", changed_paths.len());

    builder_tx
        .send(BuilderMsg::Rebuild { changed_paths })
        .await
        .map_err(|_| ())
}
