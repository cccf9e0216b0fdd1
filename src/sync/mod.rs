//! Remote theme synchronization.
//!
//! - [`classify`]: pure selection of upload-eligible artifacts
//! - [`ThemeSync`]: the remote sync client boundary
//! - [`shopify`]: the Admin API implementation

mod classify;
pub mod shopify;

pub use classify::{UploadSet, classify};
pub use shopify::ShopifyClient;

use std::future::Future;

use thiserror::Error;

/// Upload failure taxonomy. A failure is local to one submission: it is
/// reported, the set is not retried, and the gate stays usable.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("store rejected {key} ({status}): {detail}")]
    Rejected {
        key: String,
        status: u16,
        detail: String,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Remote sync client boundary.
///
/// Uploads the given keys' current on-disk content to the remote theme.
/// Resolves on success, errors on any failure. Callers must not issue
/// concurrent calls; the upload gate owns that invariant.
pub trait ThemeSync: Send + Sync + 'static {
    fn sync(&self, upload: &[String]) -> impl Future<Output = Result<(), SyncError>> + Send;
}
