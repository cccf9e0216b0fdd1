//! Live reload: message protocol, WebSocket server, embedded browser client.

pub mod message;
pub mod server;

pub use message::ReloadEvent;

use std::sync::atomic::{AtomicU16, Ordering};

/// Actual WebSocket port after binding (0 = not started). May differ from the
/// configured port when it was in use and the server retried.
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(0);

/// Record the port the WebSocket server actually bound (called by coordinator).
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Port the WebSocket server is listening on, if started.
pub fn actual_ws_port() -> Option<u16> {
    match ACTUAL_WS_PORT.load(Ordering::Relaxed) {
        0 => None,
        port => Some(port),
    }
}

/// Browser client script with the WebSocket port substituted.
pub fn client_script(ws_port: u16) -> String {
    include_str!("livereload.js").replace("__WS_PORT__", &ws_port.to_string())
}
