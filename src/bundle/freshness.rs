//! Content-based freshness detection using blake3.
//!
//! Outputs are only rewritten when their content actually changed; the
//! resulting `emitted` flags are what keeps uploads incremental.

use std::fs;
use std::io;
use std::path::Path;

/// Write `content` to `path` unless an identical file is already there.
///
/// Returns whether the file was written (the artifact's `emitted` flag).
/// Parent directories are created as needed.
pub fn write_if_changed(path: &Path, content: &[u8]) -> io::Result<bool> {
    if let Ok(existing) = fs::read(path)
        && blake3::hash(&existing) == blake3::hash(content)
    {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

/// Short hex tag over the given contents, used to stamp the layout template
/// so it changes exactly when the bundles change.
pub fn version_tag<'a>(contents: impl IntoIterator<Item = &'a [u8]>) -> String {
    let mut hasher = blake3::Hasher::new();
    for content in contents {
        hasher.update(content);
    }
    hex::encode(&hasher.finalize().as_bytes()[..8])
}
