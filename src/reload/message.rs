//! Live Reload Message Protocol
//!
//! JSON messages sent over the WebSocket to browser clients. The wire format
//! is a tagged `action` field, e.g. `{"action":"shopify_upload_finished"}`.

use serde::{Deserialize, Serialize};

/// Event published to connected live-reload clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReloadEvent {
    /// A sync batch landed on the remote theme; clients should refresh.
    ShopifyUploadFinished,

    /// Connection established (server → client).
    Connected { version: String },

    /// Full reload request with a stated reason.
    Reload { reason: String },
}

impl ReloadEvent {
    /// The sync-finished broadcast.
    pub fn upload_finished() -> Self {
        Self::ShopifyUploadFinished
    }

    /// The greeting sent right after a successful handshake.
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// An explicit full-reload request.
    pub fn reload_with_reason(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: reason.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"action":"reload","reason":"serialize error"}"#.to_string())
    }

    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_finished_wire_format() {
        let json = ReloadEvent::upload_finished().to_json();
        assert_eq!(json, r#"{"action":"shopify_upload_finished"}"#);
    }

    #[test]
    fn test_roundtrip() {
        let msg = ReloadEvent::reload_with_reason("layout changed");
        let parsed = ReloadEvent::from_json(&msg.to_json()).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_connected_carries_version() {
        let json = ReloadEvent::connected().to_json();
        assert!(json.contains(r#""action":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }
}
