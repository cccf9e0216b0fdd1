//! Shared utilities.
//!
//! Pure helpers with no actor or config dependencies:
//!
//! - [`path`]: filesystem path normalization and upload-key mapping
//! - [`mime`]: MIME lookup for the dev server
//! - [`browser`]: opening the preview URL in the default browser

pub mod browser;
pub mod mime;
pub mod path;

pub use path::{normalize_path, upload_path};
