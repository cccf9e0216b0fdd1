//! Build Event Router
//!
//! Consumes the compiler lifecycle and drives the classify → gate → notify
//! sequence. One build cycle walks the state machine
//!
//! ```text
//! Idle → Compiling → { Failed, Succeeded }
//! ```
//!
//! `Failed` is terminal for the cycle: diagnostics are rendered and no
//! classification or sync happens. A succeeding cycle always reaches the
//! gate, even with an empty upload set, so the downstream no-op path stays
//! uniform.

pub mod status;


use std::sync::Arc;

use tokio::sync::mpsc;

use super::gate::GateHandle;
use super::messages::BuildEvent;
use crate::bundle::BuildStats;
use crate::config::Config;
use crate::sync::classify;

/// Router states across one build cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Compiling,
    Failed,
    Succeeded,
}

pub struct RouterActor {
    rx: mpsc::Receiver<BuildEvent>,
    gate: GateHandle,
    config: Arc<Config>,
    state: RouterState,
}

impl RouterActor {
    pub fn new(rx: mpsc::Receiver<BuildEvent>, gate: GateHandle, config: Arc<Config>) -> Self {
        Self {
            rx,
            gate,
            config,
            state: RouterState::Idle,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            match event {
                BuildEvent::Invalidated => self.on_invalidated(),
                BuildEvent::Done(stats) => self.on_done(*stats).await,
                BuildEvent::Shutdown => {
                    crate::debug!("build"; "router shutting down");
                    break;
                }
            }
        }
    }

    fn on_invalidated(&mut self) {
        self.state = RouterState::Compiling;
        crate::logger::clear_console();
        crate::log!("build"; "compiling...");
    }

    async fn on_done(&mut self, stats: BuildStats) {
        if stats.has_errors() {
            self.state = RouterState::Failed;
            status::render_failure(&stats.errors);
            crate::core::set_serving();
            return;
        }

        self.state = RouterState::Succeeded;
        status::render_success(&stats, &self.config);
        crate::core::set_serving();

        let set = classify(&stats.assets, self.config.dist_dir());
        // Outcome is reported by the gate itself; dropping the ticket does
        // not cancel the sync.
        let _ticket = self.gate.submit(set).await;
    }

    #[cfg(test)]
    pub(super) fn state(&self) -> RouterState {
        self.state
    }
}
