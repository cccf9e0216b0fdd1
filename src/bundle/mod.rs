//! Theme bundler: the compiler side of the build-event pipeline.
//!
//! One call to [`build`] is one build cycle. It bundles the script and style
//! entries, synchronizes the remaining theme files into dist, and returns a
//! [`BuildStats`] report: diagnostics plus an asset map with per-artifact
//! `emitted` flags (content-based, see [`freshness`]).
//!
//! Compile errors short-circuit the cycle: nothing is written and the asset
//! map stays empty.

pub mod freshness;
pub mod scripts;
mod stats;
pub mod styles;
pub mod theme;

pub use stats::{Artifact, BuildStats};

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::core::BuildMode;

/// Dist-relative output name of the script bundle.
pub const SCRIPT_BUNDLE: &str = "assets/theme.js";
/// Dist-relative output name of the style bundle.
pub const STYLE_BUNDLE: &str = "assets/theme.css";

/// Run one build cycle.
pub fn build(config: &Config, mode: BuildMode) -> BuildStats {
    let start = Instant::now();
    let mut stats = BuildStats::default();

    let js = bundle_entry(&config.build.scripts, mode, scripts::bundle, &mut stats);
    let css = bundle_entry(&config.build.styles, mode, styles::bundle, &mut stats);

    if stats.has_errors() {
        stats.duration = start.elapsed();
        return stats;
    }

    let version = freshness::version_tag(
        [js.as_deref(), css.as_deref()]
            .into_iter()
            .flatten()
            .map(str::as_bytes),
    );
    let ws_port = crate::reload::actual_ws_port().unwrap_or(config.serve.ws_port);

    for (name, content) in [(SCRIPT_BUNDLE, js), (STYLE_BUNDLE, css)] {
        let Some(content) = content else { continue };
        let out = config.dist_dir().join(name);
        match freshness::write_if_changed(&out, content.as_bytes()) {
            Ok(emitted) => stats.record(name, emitted, out),
            Err(e) => stats.errors.push(format!("{}: {}", out.display(), e)),
        }
    }

    theme::sync_theme_files(config, &version, ws_port, mode, &mut stats);

    stats.duration = start.elapsed();
    stats
}

/// Bundle one entry file. Missing entries are a warning, parse failures are
/// errors, both recorded on `stats`.
fn bundle_entry(
    entry: &Path,
    mode: BuildMode,
    bundle: fn(&Path, &str, BuildMode) -> Result<String, Vec<String>>,
    stats: &mut BuildStats,
) -> Option<String> {
    let source = match fs::read_to_string(entry) {
        Ok(source) => source,
        Err(_) => {
            stats
                .warnings
                .push(format!("entry not found, skipping: {}", entry.display()));
            return None;
        }
    };

    match bundle(entry, &source, mode) {
        Ok(content) => Some(content),
        Err(errors) => {
            stats.errors.extend(errors);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.root = root.to_path_buf();
        config.build.source = root.join("src");
        config.build.output = root.join("dist");
        config.build.scripts = root.join("src/scripts/theme.js");
        config.build.styles = root.join("src/styles/theme.css");
        config
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn seed_theme(root: &Path) {
        write(root, "src/scripts/theme.js", "console.log('hi');\n");
        write(root, "src/styles/theme.css", "body { color: #111; }\n");
        write(root, "src/layout/theme.liquid", "<head></head>{{ content_for_layout }}");
        write(root, "src/templates/index.liquid", "<h1>home</h1>");
    }

    #[test]
    fn test_build_reports_all_artifacts_emitted_on_first_run() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        let config = make_config(dir.path());

        let stats = build(&config, BuildMode::Development);

        assert!(!stats.has_errors(), "errors: {:?}", stats.errors);
        for name in [SCRIPT_BUNDLE, STYLE_BUNDLE, "layout/theme.liquid", "templates/index.liquid"] {
            let artifact = stats.assets.get(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(artifact.emitted, "{name} should be emitted");
            assert!(artifact.exists_at.is_file(), "{name} should exist on disk");
        }
    }

    #[test]
    fn test_rebuild_without_changes_emits_nothing() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        let config = make_config(dir.path());

        build(&config, BuildMode::Development);
        let stats = build(&config, BuildMode::Development);

        assert!(!stats.has_errors());
        assert!(stats.assets.values().all(|a| !a.emitted));
    }

    #[test]
    fn test_script_change_reemits_bundle_and_layout() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        let config = make_config(dir.path());

        build(&config, BuildMode::Development);
        write(dir.path(), "src/scripts/theme.js", "console.log('changed');\n");
        let stats = build(&config, BuildMode::Development);

        assert!(stats.assets[SCRIPT_BUNDLE].emitted);
        // Layout re-renders with the new version stamp
        assert!(stats.assets["layout/theme.liquid"].emitted);
        // Untouched files stay unemitted
        assert!(!stats.assets["templates/index.liquid"].emitted);
        assert!(!stats.assets[STYLE_BUNDLE].emitted);
    }

    #[test]
    fn test_compile_error_short_circuits_emission() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        write(dir.path(), "src/scripts/theme.js", "const = broken");
        let config = make_config(dir.path());

        let stats = build(&config, BuildMode::Development);

        assert!(stats.has_errors());
        assert!(stats.assets.is_empty());
        assert!(!dir.path().join("dist").join("assets").join("theme.js").exists());
    }

    #[test]
    fn test_missing_entries_are_warnings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/templates/index.liquid", "<h1>home</h1>");
        let config = make_config(dir.path());

        let stats = build(&config, BuildMode::Development);

        assert!(!stats.has_errors());
        assert_eq!(stats.warnings.len(), 2);
        assert!(stats.assets.contains_key("templates/index.liquid"));
        assert!(!stats.assets.contains_key(SCRIPT_BUNDLE));
    }

    #[test]
    fn test_bundled_dirs_not_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        let config = make_config(dir.path());

        let stats = build(&config, BuildMode::Development);

        assert!(!stats.assets.contains_key("scripts/theme.js"));
        assert!(!stats.assets.contains_key("styles/theme.css"));
        assert!(!config.dist_dir().join("scripts").exists());
    }

    #[test]
    fn test_artifact_names_are_dist_relative() {
        let dir = TempDir::new().unwrap();
        seed_theme(dir.path());
        let config = make_config(dir.path());

        let stats = build(&config, BuildMode::Development);
        let artifact = &stats.assets["templates/index.liquid"];
        assert_eq!(
            artifact.exists_at,
            PathBuf::from(config.dist_dir()).join("templates").join("index.liquid")
        );
    }
}
