//! Builder Actor - Bundler Wrapper
//!
//! Runs the theme bundler off the async runtime and translates each run into
//! the compiler lifecycle the router consumes: `Invalidated` when a build
//! starts, `Done` with the stats report when it finishes.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{BuildEvent, BuilderMsg};
use crate::config::Config;
use crate::core::BuildMode;

pub struct BuilderActor {
    rx: mpsc::Receiver<BuilderMsg>,
    router_tx: mpsc::Sender<BuildEvent>,
    config: Arc<Config>,
}

impl BuilderActor {
    pub fn new(
        rx: mpsc::Receiver<BuilderMsg>,
        router_tx: mpsc::Sender<BuildEvent>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            rx,
            router_tx,
            config,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                BuilderMsg::Rebuild { changed_paths } => self.on_rebuild(changed_paths).await,
                BuilderMsg::Shutdown => {
                    crate::debug!("build"; "shutting down");
                    break;
                }
            }
        }
    }

    async fn on_rebuild(&mut self, changed_paths: Vec<PathBuf>) {
        if !changed_paths.is_empty() {
            crate::debug!("build"; "{} path(s) triggered rebuild", changed_paths.len());
        }

        if self.router_tx.send(BuildEvent::Invalidated).await.is_err() {
            return;
        }

        let config = Arc::clone(&self.config);
        let result =
            tokio::task::spawn_blocking(move || crate::bundle::build(&config, BuildMode::Development))
                .await;

        match result {
            Ok(stats) => {
                let _ = self.router_tx.send(BuildEvent::Done(Box::new(stats))).await;
            }
            Err(e) => {
                crate::log!("build"; "build task panicked: {}", e);
            }
        }
    }
}
