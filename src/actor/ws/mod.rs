//! WebSocket Actor - Live Reload Broadcast
//!
//! Handshakes incoming clients, keeps the registry of open connections, and
//! fans published events out to all of them.
//!
//! Fan-out is best effort: a disconnected client misses the event and is
//! dropped from the registry on the failed send, and a client that connects
//! after a publish never sees it.

use std::net::TcpStream;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::reload::ReloadEvent;

pub struct WsActor {
    rx: mpsc::Receiver<WsMsg>,
    /// Every open connection; pruned on failed sends
    clients: Mutex<Vec<WebSocket<TcpStream>>>,
}

impl WsActor {
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Mutex::new(Vec::new()),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Publish(event) => {
                    crate::debug!("reload"; "publish: {}", event.to_json());
                    self.broadcast(Message::Text(event.to_json().into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("reload"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.close(None);
                    }
                    break;
                }
            }
        }
    }

    /// Handshake a raw TCP stream and register the client.
    fn add_client(&self, stream: TcpStream) {
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let hello = ReloadEvent::connected();
                let _ = ws.send(Message::Text(hello.to_json().into()));
                self.clients.lock().push(ws);
            }
            Err(e) => {
                crate::debug!("reload"; "handshake failed: {}", e);
            }
        }
    }

    /// Broadcast a message to all connected clients, pruning dead ones.
    fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("reload"; "no clients connected");
            return;
        }

        clients.retain_mut(|client| match client.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("reload"; "client disconnected: {}", e);
                false
            }
        });
        crate::debug!("reload"; "broadcast to {} clients", count);
    }
}
