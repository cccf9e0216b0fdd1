//! Theme file synchronization: copy liquid sources into dist and re-render
//! the layout template.
//!
//! The layout is stamped with the current bundle version tag, so it is
//! re-emitted exactly when scripts or styles change. In development mode the
//! live-reload client is inlined into `</head>`.

use std::fs;
use std::path::Path;

use jwalk::WalkDir;

use super::freshness::write_if_changed;
use super::stats::BuildStats;
use crate::config::Config;
use crate::core::BuildMode;

/// Dist-relative name of the layout template.
pub const LAYOUT_NAME: &str = "layout/theme.liquid";

/// Copy all theme files from the source tree into dist, rendering the layout.
///
/// Bundled directories (script/style entries) are skipped; their outputs are
/// written separately. I/O failures become build errors but do not stop the
/// remaining files.
pub fn sync_theme_files(
    config: &Config,
    version: &str,
    ws_port: u16,
    mode: BuildMode,
    stats: &mut BuildStats,
) {
    let source = &config.build.source;
    let dist = config.dist_dir();
    let bundled = config.build.bundled_dirs();

    let mut files: Vec<_> = WalkDir::new(source)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| !bundled.iter().any(|dir| !dir.as_os_str().is_empty() && p.starts_with(dir)))
        .filter(|p| !is_hidden(p))
        .collect();
    files.sort();

    for path in files {
        let Ok(rel) = path.strip_prefix(source) else {
            continue;
        };
        let Some(name) = rel.to_str().map(|s| s.replace('\\', "/")) else {
            continue;
        };
        let out = dist.join(rel);

        let result = if name == LAYOUT_NAME {
            render_and_write(&path, &out, version, ws_port, mode)
        } else {
            copy_file(&path, &out)
        };

        match result {
            Ok(emitted) => stats.record(name, emitted, out),
            Err(e) => stats.errors.push(format!("{}: {}", path.display(), e)),
        }
    }
}

fn copy_file(source: &Path, out: &Path) -> std::io::Result<bool> {
    let content = fs::read(source)?;
    write_if_changed(out, &content)
}

fn render_and_write(
    source: &Path,
    out: &Path,
    version: &str,
    ws_port: u16,
    mode: BuildMode,
) -> std::io::Result<bool> {
    let content = fs::read_to_string(source)?;
    let rendered = render_layout(&content, version, ws_port, mode);
    write_if_changed(out, rendered.as_bytes())
}

/// Render the layout template: version stamp plus, in development, the
/// inlined live-reload client.
pub fn render_layout(source: &str, version: &str, ws_port: u16, mode: BuildMode) -> String {
    let mut rendered = String::with_capacity(source.len() + 256);
    rendered.push_str(&format!(
        "{{% comment %}} asset build: {version} {{% endcomment %}}\n"
    ));
    rendered.push_str(source);

    if !mode.is_production() {
        let snippet = format!(
            "<script>\n{}</script>\n",
            crate::reload::client_script(ws_port)
        );
        if let Some(head_end) = rendered.find("</head>") {
            rendered.insert_str(head_end, &snippet);
        } else {
            rendered.push_str(&snippet);
        }
    }

    rendered
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout_stamps_version() {
        let out = render_layout("<html></html>", "abc123", 35729, BuildMode::Production);
        assert!(out.starts_with("{% comment %} asset build: abc123 {% endcomment %}"));
        assert!(out.contains("<html></html>"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_render_layout_injects_reload_client_in_dev() {
        let out = render_layout(
            "<html><head></head><body></body></html>",
            "abc123",
            35729,
            BuildMode::Development,
        );
        let script_pos = out.find("<script>").expect("reload client injected");
        let head_end = out.find("</head>").unwrap();
        assert!(script_pos < head_end);
        assert!(out.contains("35729"));
    }

    #[test]
    fn test_render_layout_appends_client_without_head() {
        let out = render_layout("{{ content_for_layout }}", "v1", 4000, BuildMode::Development);
        assert!(out.contains("<script>"));
        assert!(out.contains("4000"));
    }
}
