//! WebSocket accept loop for live reload.
//!
//! Listens on its own port and forwards raw TCP streams to the WsActor,
//! which performs the handshake and keeps the client registry.

use std::net::TcpListener;

use anyhow::Result;

use crate::actor::messages::WsMsg;

const MAX_PORT_RETRIES: u16 = 10;

/// Bind and start accepting; returns the port that was actually bound, which
/// may differ from `base_port` when that one was taken.
pub fn start(base_port: u16, ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Result<u16> {
    let (listener, actual_port) = bind_near(base_port)?;
    listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        loop {
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("reload"; "client connected: {}", addr);

                    // The WsActor handshakes and writes synchronously
                    let _ = stream.set_nonblocking(false);

                    if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                        crate::log!("reload"; "actor gone, stopping accept loop");
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Err(e) => {
                    crate::log!("reload"; "accept error: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    Ok(actual_port)
}

/// Walk upward from `base_port` until a bind succeeds.
fn bind_near(base_port: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(("127.0.0.1", port)) {
            Ok(listener) => {
                let bound = listener.local_addr()?.port();
                return Ok((listener, bound));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "no free websocket port in {}..{}: {}",
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
