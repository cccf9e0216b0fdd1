//! Actor Coordinator - Wires up the Sync Pipeline Actor System
//!
//! Creates the channels, constructs the sync client and every actor, kicks
//! the initial build, and runs the pipeline until shutdown. Built once at
//! process start, torn down at process exit.

use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::builder::BuilderActor;
use super::fs::FsActor;
use super::gate::{GateHandle, UploadGate};
use super::messages::{BuildEvent, BuilderMsg, GateMsg, WsMsg};
use super::router::RouterActor;
use super::ws::WsActor;
use crate::config::Config;
use crate::sync::ShopifyClient;

const CHANNEL_BUFFER: usize = 32;

pub struct Coordinator {
    config: Arc<Config>,
    ws_port: Option<u16>,
    watch: bool,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn with_config(config: Arc<Config>) -> Self {
        Self {
            config,
            ws_port: None,
            watch: true,
            shutdown_rx: None,
        }
    }

    /// Port for the live-reload WebSocket server.
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Whether to watch the source tree for rebuilds.
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Channel the Ctrl+C handler signals on.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (builder_tx, builder_rx) = mpsc::channel::<BuilderMsg>(CHANNEL_BUFFER);
        let (router_tx, router_rx) = mpsc::channel::<BuildEvent>(CHANNEL_BUFFER);
        let (gate_tx, gate_rx) = mpsc::channel::<GateMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        if let Some(port) = self.ws_port {
            match crate::reload::server::start(port, ws_tx.clone()) {
                Ok(actual_port) => {
                    crate::reload::set_actual_ws_port(actual_port);
                    crate::debug!("reload"; "ws://localhost:{}", actual_port);
                }
                Err(e) => {
                    crate::log!("actor"; "websocket server failed: {}", e);
                }
            }
        }

        let client = ShopifyClient::from_config(&self.config)?;

        let fs_actor = if self.watch {
            let actor = FsActor::new(Arc::clone(&self.config), builder_tx.clone())
                .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;
            Some(actor)
        } else {
            None
        };

        let builder_actor =
            BuilderActor::new(builder_rx, router_tx.clone(), Arc::clone(&self.config));
        let router_actor = RouterActor::new(
            router_rx,
            GateHandle::new(gate_tx.clone()),
            Arc::clone(&self.config),
        );
        let gate = UploadGate::new(gate_rx, Arc::new(client), ws_tx.clone());
        let ws_actor = WsActor::new(ws_rx);

        // Initial build kicks the pipeline before any file change arrives
        let _ = builder_tx
            .send(BuilderMsg::Rebuild {
                changed_paths: Vec::new(),
            })
            .await;

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();

        let fs_handle = fs_actor.map(|actor| tokio::spawn(actor.run()));
        let builder_handle = tokio::spawn(builder_actor.run());
        let router_handle = tokio::spawn(router_actor.run());
        let gate_handle = tokio::spawn(gate.run());
        let ws_handle = tokio::spawn(ws_actor.run());

        if let Some(rx) = shutdown_rx {
            loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        } else {
            tokio::select! {
                _ = builder_handle => {}
                _ = router_handle => {}
                _ = gate_handle => {}
            }
        }

        // Drain the pipeline back-to-front so an in-flight sync resolves
        if let Some(handle) = fs_handle {
            handle.abort();
        }
        let _ = builder_tx.send(BuilderMsg::Shutdown).await;
        let _ = router_tx.send(BuildEvent::Shutdown).await;
        let _ = gate_tx.send(GateMsg::Shutdown).await;
        let _ = ws_tx.send(WsMsg::Shutdown).await;
        let _ =
            tokio::time::timeout(std::time::Duration::from_millis(500), ws_handle).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
