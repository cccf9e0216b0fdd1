//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Bind address (0.0.0.0 exposes to the LAN)
//! port = 3000                 # HTTP port
//! ws_port = 35729             # Live-reload WebSocket port
//! watch = true                # Rebuild and upload on file changes
//! open_browser = true         # Open the store preview on startup
//! ```

use std::net::{IpAddr, Ipv4Addr};

use serde::Deserialize;

/// Development server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Bind address; `127.0.0.1` by default, `0.0.0.0` for LAN access.
    pub interface: IpAddr,

    /// HTTP port.
    pub port: u16,

    /// Live-reload WebSocket port.
    pub ws_port: u16,

    /// Enable file watcher for rebuild + upload.
    pub watch: bool,

    /// Open the store preview URL in a browser on startup.
    pub open_browser: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
            ws_port: 35729,
            watch: true,
            open_browser: true,
        }
    }
}
