//! Message types passed between the pipeline's actors.
//!
//! ```text
//! FsActor --Rebuild--> BuilderActor --BuildEvent--> RouterActor --Submit--> UploadGate --Publish--> WsActor
//! ```

use std::net::TcpStream;
use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::actor::gate::SyncOutcome;
use crate::bundle::BuildStats;
use crate::reload::ReloadEvent;
use crate::sync::UploadSet;

// =============================================================================
// BuilderActor Messages
// =============================================================================

/// Messages to Builder Actor
#[derive(Debug)]
pub enum BuilderMsg {
    /// Run a build cycle. Paths are informational (logging), the bundle
    /// always covers the whole source tree.
    Rebuild { changed_paths: Vec<PathBuf> },
    /// Shutdown
    Shutdown,
}

// =============================================================================
// RouterActor Messages (compiler lifecycle)
// =============================================================================

/// Compiler lifecycle events consumed by the Build Event Router.
///
/// The router's inbox is processed sequentially, so a new `Invalidated` can
/// never interleave with a prior `Done` handler.
#[derive(Debug)]
pub enum BuildEvent {
    /// A build started; previously displayed status is stale
    Invalidated,
    /// A build finished, with diagnostics and the asset report
    /// (boxed: BuildStats carries the full asset map)
    Done(Box<BuildStats>),
    /// Shutdown
    Shutdown,
}

// =============================================================================
// UploadGate Messages
// =============================================================================

/// Messages to the Upload Gate
#[derive(Debug)]
pub enum GateMsg {
    /// Sync one build cycle's upload set to the remote theme
    Submit {
        set: UploadSet,
        /// Structured outcome for the submitter; dropping the receiver does
        /// not cancel the sync
        reply: oneshot::Sender<SyncOutcome>,
    },
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to the live-reload WsActor
pub enum WsMsg {
    /// Broadcast an event to all connected clients
    Publish(ReloadEvent),
    /// Add client
    AddClient(TcpStream),
    /// Shutdown
    Shutdown,
}
