//! Style bundling for the theme's CSS entry.
//!
//! Uses lightningcss: every build parses the entry; production builds
//! additionally minify.

use std::path::Path;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use crate::core::BuildMode;

/// Bundle the style entry. Returns the output content, or the parse errors
/// as compile diagnostics.
pub fn bundle(entry: &Path, source: &str, mode: BuildMode) -> Result<String, Vec<String>> {
    let stylesheet = match StyleSheet::parse(source, ParserOptions::default()) {
        Ok(sheet) => sheet,
        Err(e) => return Err(vec![format!("{}: {}", entry.display(), e)]),
    };

    if !mode.is_production() {
        return Ok(source.to_string());
    }

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| vec![format!("{}: {}", entry.display(), e)])?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dev_bundle_passes_source_through() {
        let entry = PathBuf::from("styles/theme.css");
        let source = ".price {\n  color: #111;\n}\n";
        let out = bundle(&entry, source, BuildMode::Development).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_production_bundle_minifies() {
        let entry = PathBuf::from("styles/theme.css");
        let source = ".price {\n  color: #111111;\n}\n";
        let out = bundle(&entry, source, BuildMode::Production).unwrap();
        assert!(out.len() < source.len());
    }

    #[test]
    fn test_parse_error_reported_with_entry_name() {
        let entry = PathBuf::from("styles/theme.css");
        let errors = bundle(&entry, "} .broken {", BuildMode::Development).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("styles/theme.css"));
    }
}
