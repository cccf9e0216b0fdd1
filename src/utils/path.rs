//! Path normalization and upload-key mapping.
//!
//! Upload keys are the wire form the theme store expects: relative to the
//! distribution root, forward slashes, leading `/` (e.g. `/assets/theme.js`).

use std::path::{Component, Path, PathBuf};

/// Make a path absolute, canonicalizing when the file exists and falling
/// back to a cwd join when it does not.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Map an absolute output file to its upload key under `dist_root`.
///
/// Returns `None` when the file is not inside the distribution root.
pub fn upload_path(dist_root: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(dist_root).ok()?;

    let mut key = String::new();
    for component in rel.components() {
        let Component::Normal(part) = component else {
            return None;
        };
        key.push('/');
        key.push_str(part.to_str()?);
    }

    (!key.is_empty()).then_some(key)
}

/// Inverse of [`upload_path`]: resolve an upload key to its on-disk file.
pub fn upload_key_to_file(dist_root: &Path, key: &str) -> PathBuf {
    let mut file = dist_root.to_path_buf();
    for part in key.split('/').filter(|p| !p.is_empty()) {
        file.push(part);
    }
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_upload_path_inside_root() {
        let root = Path::new("/project/dist");
        let file = root.join("assets").join("theme.js");
        assert_eq!(upload_path(root, &file).as_deref(), Some("/assets/theme.js"));
    }

    #[test]
    fn test_upload_path_layout() {
        let root = Path::new("/project/dist");
        let file = root.join("layout").join("theme.liquid");
        assert_eq!(
            upload_path(root, &file).as_deref(),
            Some("/layout/theme.liquid")
        );
    }

    #[test]
    fn test_upload_path_outside_root() {
        let root = Path::new("/project/dist");
        assert!(upload_path(root, Path::new("/elsewhere/a.js")).is_none());
    }

    #[test]
    fn test_upload_key_roundtrip() {
        let root = Path::new("/project/dist");
        let file = upload_key_to_file(root, "/snippets/price.liquid");
        assert_eq!(file, root.join("snippets").join("price.liquid"));
        assert_eq!(
            upload_path(root, &file).as_deref(),
            Some("/snippets/price.liquid")
        );
    }
}
