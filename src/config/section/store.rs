//! `[store]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! store = "dev-shop.myshopify.com"    # Store domain
//! theme_id = 128755464234             # Development theme id
//! api_version = "2024-01"             # Admin API version
//! token_path = "~/.vitrine-token"     # Optional: token file path
//! ```
//!
//! The API token is read from the `VITRINE_TOKEN` environment variable, or
//! from `token_path` when set.
//!
//! # Security
//! - Store tokens outside the repository (e.g., `~/.vitrine-token`)
//! - Never commit tokens to version control!

use serde::Deserialize;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Environment variable consulted for the Admin API token.
pub const TOKEN_ENV: &str = "VITRINE_TOKEN";

/// Remote theme store settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store domain (e.g. `dev-shop.myshopify.com`).
    pub store: String,

    /// Theme id the uploads target. Use a development theme, not the
    /// published one.
    pub theme_id: u64,

    /// Admin API version segment.
    pub api_version: String,

    /// Path to a file containing the Admin API token.
    pub token_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store: String::new(),
            theme_id: 0,
            api_version: "2024-01".to_string(),
            token_path: None,
        }
    }
}

impl StoreConfig {
    /// Validate store settings needed for uploads.
    pub fn validate(&self) -> Result<()> {
        if self.store.is_empty() {
            bail!("[store] store is not set in vitrine.toml");
        }
        if self.store.starts_with("http://") || self.store.starts_with("https://") {
            bail!("[store] store must be a bare domain, not a URL: {}", self.store);
        }
        if self.theme_id == 0 {
            bail!("[store] theme_id is not set in vitrine.toml");
        }
        Ok(())
    }

    /// Admin API endpoint for theme asset uploads.
    pub fn assets_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/themes/{}/assets.json",
            self.store, self.api_version, self.theme_id
        )
    }

    /// Resolve the Admin API token: environment first, then `token_path`.
    pub fn resolve_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            return Ok(token.trim().to_string());
        }

        if let Some(path) = &self.token_path {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            let token = std::fs::read_to_string(&expanded)
                .map_err(|e| anyhow::anyhow!("cannot read token file {}: {}", expanded, e))?;
            let token = token.trim();
            if token.is_empty() {
                bail!("token file is empty: {}", expanded);
            }
            return Ok(token.to_string());
        }

        bail!(
            "no API token: set {} or [store] token_path in vitrine.toml",
            TOKEN_ENV
        )
    }
}
