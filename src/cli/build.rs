//! One-shot production build.

use anyhow::{Result, bail};

use crate::actor::router::status;
use crate::bundle;
use crate::config::Config;
use crate::core::BuildMode;
use crate::log;

pub fn run(config: &Config) -> Result<()> {
    log!("build"; "building theme bundle...");

    let stats = bundle::build(config, BuildMode::Production);

    if stats.has_errors() {
        status::render_failure(&stats.errors);
        bail!("build failed with {} error(s)", stats.errors.len());
    }

    for warning in &stats.warnings {
        crate::logger::status_warning(warning);
    }

    let emitted = stats.assets.values().filter(|a| a.emitted).count();
    log!(
        "build";
        "{} artifact(s), {} written, in {:?}",
        stats.assets.len(),
        emitted,
        stats.duration
    );

    Ok(())
}
