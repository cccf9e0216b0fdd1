//! clap derive definitions for the CLI surface.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine theme development CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: vitrine.toml)
    #[arg(short = 'C', long, default_value = "vitrine.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start development server: watch, rebuild, upload changed files, live-reload
    #[command(visible_alias = "s")]
    Serve {
        /// Interface to bind (127.0.0.1 for localhost, 0.0.0.0 for LAN)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for rebuild + upload
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,

        /// Print debug-level output
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Build the theme bundle for production
    #[command(visible_alias = "b")]
    Build {
        /// Print debug-level output
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Upload the full built theme to the store
    #[command(visible_alias = "d")]
    Deploy {
        /// Print debug-level output
        #[arg(short = 'V', long)]
        verbose: bool,
    },
}

impl Cli {
    pub const fn verbose(&self) -> bool {
        match self.command {
            Commands::Serve { verbose, .. }
            | Commands::Build { verbose }
            | Commands::Deploy { verbose } => verbose,
        }
    }

}
