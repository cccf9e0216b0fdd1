//! Per-build report types.

use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::time::Duration;

/// One bundler output unit. Lives only for the duration of one build cycle's
/// event handling.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Written to disk during this build (content changed since last cycle).
    pub emitted: bool,
    /// Absolute on-disk location.
    pub exists_at: PathBuf,
}

/// Diagnostics and asset report for one build cycle.
///
/// `errors` non-empty means the cycle failed: no artifacts were written and
/// nothing downstream should run.
#[derive(Debug, Default)]
pub struct BuildStats {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Output artifacts keyed by logical name (dist-relative, forward slashes).
    pub assets: FxHashMap<String, Artifact>,
    pub duration: Duration,
}

impl BuildStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record one output artifact.
    pub fn record(&mut self, name: impl Into<String>, emitted: bool, exists_at: PathBuf) {
        self.assets.insert(name.into(), Artifact { emitted, exists_at });
    }
}
