//! Full-theme upload to the store.
//!
//! Builds for production, then uploads every file under dist in one batch.
//! Used for first-time publication of a development theme; day-to-day work
//! goes through `serve`, which uploads incrementally.

use anyhow::{Result, bail};
use jwalk::WalkDir;

use crate::actor::router::status;
use crate::bundle;
use crate::config::Config;
use crate::core::BuildMode;
use crate::log;
use crate::sync::{ShopifyClient, ThemeSync};
use crate::utils::upload_path;

pub fn run(config: &Config) -> Result<()> {
    let stats = bundle::build(config, BuildMode::Production);
    if stats.has_errors() {
        status::render_failure(&stats.errors);
        bail!("build failed with {} error(s)", stats.errors.len());
    }

    let client = ShopifyClient::from_config(config)?;

    let dist = config.dist_dir();
    let mut files: Vec<String> = WalkDir::new(dist)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| upload_path(dist, &e.path()))
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("nothing to deploy: {} is empty", dist.display());
    }

    log!("deploy"; "uploading {} file(s) to {}", files.len(), config.store.store);
    for file in &files {
        log!("deploy"; "  {}", file);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(client.sync(&files))?;

    crate::logger::status_success("theme deployed");
    log!("deploy"; "preview at {}", config.preview_url());
    Ok(())
}
