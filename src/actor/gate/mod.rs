//! Upload Gate
//!
//! Owns the "at most one sync in flight" invariant. Submissions are processed
//! inline in the actor loop, so a submission arriving while another is in
//! flight waits in the channel, strictly in arrival order. Nothing is
//! coalesced or dropped: every build cycle that reaches the gate gets its own
//! sync attempt.
//!
//! A failed sync is local to its submission; the gate stays usable for the
//! next one. No live-reload notification is sent for a failed set, nor for
//! the lone layout template whose upload is a side effect of other uploads.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::messages::{GateMsg, WsMsg};
use crate::reload::ReloadEvent;
use crate::sync::{SyncError, ThemeSync, UploadSet};

/// Upload key whose lone appearance suppresses the reload notification: the
/// layout template is rewritten whenever scripts or styles change, so its
/// solo upload carries no user-meaningful change.
pub const LAYOUT_TEMPLATE: &str = "/layout/theme.liquid";

/// Structured result of one submission.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Empty set: trivial success, no remote call was made
    Skipped,
    /// All files uploaded
    Uploaded { files: usize },
    /// The remote sync client rejected the batch
    Failed(SyncError),
}

impl SyncOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// True when the set is exactly the layout template and nothing else.
pub fn is_layout_only(set: &[String]) -> bool {
    matches!(set, [only] if only == LAYOUT_TEMPLATE)
}

/// Upload Gate actor - serialized remote sync.
pub struct UploadGate<S: ThemeSync> {
    rx: mpsc::Receiver<GateMsg>,
    client: Arc<S>,
    ws_tx: mpsc::Sender<WsMsg>,
}

impl<S: ThemeSync> UploadGate<S> {
    pub fn new(rx: mpsc::Receiver<GateMsg>, client: Arc<S>, ws_tx: mpsc::Sender<WsMsg>) -> Self {
        Self { rx, client, ws_tx }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                GateMsg::Submit { set, reply } => {
                    // Awaiting here is what serializes submissions.
                    let outcome = self.process(set).await;
                    let _ = reply.send(outcome);
                }
                GateMsg::Shutdown => {
                    crate::debug!("upload"; "shutting down");
                    break;
                }
            }
        }
    }

    async fn process(&mut self, set: UploadSet) -> SyncOutcome {
        if set.is_empty() {
            crate::debug!("upload"; "nothing to sync");
            return SyncOutcome::Skipped;
        }

        let mut listing = set.clone();
        listing.sort();
        crate::log!("upload"; "uploading {} file(s) to the theme store", listing.len());
        for file in &listing {
            crate::log!("upload"; "  {}", file);
        }

        match self.client.sync(&set).await {
            Ok(()) => {
                if !is_layout_only(&set) {
                    let _ = self
                        .ws_tx
                        .send(WsMsg::Publish(ReloadEvent::upload_finished()))
                        .await;
                }
                crate::logger::status_success("files uploaded successfully");
                SyncOutcome::Uploaded { files: set.len() }
            }
            Err(e) => {
                crate::logger::status_error("upload failed", &e.to_string());
                SyncOutcome::Failed(e)
            }
        }
    }
}

/// Handle for submitting upload sets to the gate.
#[derive(Clone)]
pub struct GateHandle {
    tx: mpsc::Sender<GateMsg>,
}

impl GateHandle {
    pub fn new(tx: mpsc::Sender<GateMsg>) -> Self {
        Self { tx }
    }

    /// Queue one build cycle's upload set.
    ///
    /// Returns a ticket resolving to the structured [`SyncOutcome`], so
    /// callers and tests can observe success or failure without parsing log
    /// text. Dropping the ticket does not cancel the sync.
    pub async fn submit(&self, set: UploadSet) -> oneshot::Receiver<SyncOutcome> {
        let (reply, ticket) = oneshot::channel();
        if self
            .tx
            .send(GateMsg::Submit { set, reply })
            .await
            .is_err()
        {
            crate::log!("upload"; "gate unavailable, dropping submission");
        }
        ticket
    }
}
