//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "src"                  # Theme source tree
//! output = "dist"                 # Bundled output (upload origin)
//! scripts = "scripts/theme.js"    # Script bundle entry (relative to source)
//! styles = "styles/theme.css"     # Style bundle entry (relative to source)
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Build settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Theme source directory (layout/, templates/, sections/, ... plus the
    /// script and style entries below).
    pub source: PathBuf,

    /// Output directory. Everything uploaded comes from here.
    pub output: PathBuf,

    /// Script bundle entry point, relative to `source`.
    pub scripts: PathBuf,

    /// Style bundle entry point, relative to `source`.
    pub styles: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            output: PathBuf::from("dist"),
            scripts: PathBuf::from("scripts/theme.js"),
            styles: PathBuf::from("styles/theme.css"),
        }
    }
}

impl BuildConfig {
    /// Resolve all paths to absolute form against the project root.
    pub fn normalize(&mut self, root: &Path) {
        if self.source.is_relative() {
            self.source = root.join(&self.source);
        }
        if self.output.is_relative() {
            self.output = root.join(&self.output);
        }
        if self.scripts.is_relative() {
            self.scripts = self.source.join(&self.scripts);
        }
        if self.styles.is_relative() {
            self.styles = self.source.join(&self.styles);
        }
    }

    /// Directories under `source` that are bundled rather than copied.
    pub fn bundled_dirs(&self) -> [PathBuf; 2] {
        [
            self.scripts.parent().map(Path::to_path_buf).unwrap_or_default(),
            self.styles.parent().map(Path::to_path_buf).unwrap_or_default(),
        ]
    }
}
