//! Compile status rendering for the terminal.

use owo_colors::OwoColorize;

use crate::bundle::BuildStats;
use crate::config::Config;

/// Render a failed compile: all error messages, nothing else.
pub fn render_failure(errors: &[String]) {
    crate::log!("error"; "{}", "failed to compile".red().bold());
    println!();
    for error in errors {
        println!("{error}");
        println!();
    }
}

/// Render a succeeded compile: warnings with guidance, or the clean
/// confirmation with the preview URL.
pub fn render_success(stats: &BuildStats, config: &Config) {
    if !stats.warnings.is_empty() {
        crate::log!("build"; "{}", "compiled with warnings".yellow().bold());
        println!();
        for warning in &stats.warnings {
            println!("{warning}");
            println!();
        }
        println!(
            "Warnings do not block uploads. Fix them to keep the theme bundle complete."
        );
        return;
    }

    crate::log!("build"; "{} in {:?}", "compiled successfully".green().bold(), stats.duration);
    println!();
    println!("The theme preview is running at:");
    println!();
    println!("  {}", config.preview_url().cyan());
    println!();
}
