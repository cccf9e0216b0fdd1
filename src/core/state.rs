//! Process-wide flags for serve mode.
//!
//! Two independent bits:
//! - `SERVING`: the first build cycle has finished, real files can be served
//!   (until then requests get the loading page)
//! - `SHUTDOWN`: Ctrl+C was pressed, everything should wind down

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

static SERVING: AtomicBool = AtomicBool::new(false);
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Listener handle so the Ctrl+C handler can unblock the accept loop.
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Channel into the actor system, signalled on shutdown.
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

/// Whether the first build cycle has completed.
pub fn is_serving() -> bool {
    SERVING.load(Ordering::SeqCst)
}

/// Flip the dev server from loading-page mode to serving dist files.
pub fn set_serving() {
    SERVING.store(true, Ordering::SeqCst);
}

/// Install the Ctrl+C handler. Must run before anything blocks.
///
/// Until [`register_server`] has been called there is nothing to unwind, so
/// the handler just exits; afterwards it flags shutdown, pokes the actor
/// system, and unblocks the HTTP accept loop.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Hand the bound listener and the actor shutdown channel to the Ctrl+C
/// handler. Call between binding and entering the request loop.
pub fn register_server(server: Arc<Server>, shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SERVER.set(server);
    let _ = SHUTDOWN_TX.set(shutdown_tx);
}

/// Whether Ctrl+C has been pressed. Relaxed is fine here: reading a stale
/// `false` only means finishing the request in hand.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
