//! Artifact classification: which build outputs are eligible for upload.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::bundle::Artifact;
use crate::utils::upload_path;

/// Dist-relative upload keys selected for one build cycle. An empty set is
/// valid and short-circuits the sync step downstream.
pub type UploadSet = Vec<String>;

/// Select the artifacts that represent files physically on disk.
///
/// An artifact is included iff its `emitted` flag is set AND a file exists at
/// its on-disk path right now. The build may mark an artifact emitted before
/// its write lands, so the disk is re-checked rather than trusted.
///
/// Output order follows map iteration; consumers must not depend on it.
pub fn classify(assets: &FxHashMap<String, Artifact>, dist_root: &Path) -> UploadSet {
    let mut files = UploadSet::new();

    for artifact in assets.values() {
        if !artifact.emitted {
            continue;
        }
        if !artifact.exists_at.is_file() {
            continue;
        }
        if let Some(key) = upload_path(dist_root, &artifact.exists_at) {
            files.push(key);
        }
    }

    files
}
