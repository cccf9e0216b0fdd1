//! Vitrine - live-sync development server for remote storefront themes.

#![allow(dead_code)]

mod actor;
mod bundle;
mod cli;
mod config;
mod core;
mod logger;
mod reload;
mod sync;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{Config, init_config};

fn main() -> Result<()> {
    // Ctrl+C handler first, nothing may block before it is installed
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors probes the TTY itself
    }

    let config = init_config(Config::load(cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::run(&config),
        Commands::Build { .. } => cli::build::run(&config),
        Commands::Deploy { .. } => cli::deploy::run(&config),
    }
}
