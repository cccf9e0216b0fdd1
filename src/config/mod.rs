//! Project configuration management for `vitrine.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[build]`  | Source/output paths, bundle entry points       |
//! | `[serve]`  | Development server (port, interface, watch)    |
//! | `[store]`  | Remote theme store (domain, theme id, token)   |

mod handle;
pub mod section;

pub use handle::{cfg, init_config};
pub use section::{BuildConfig, ServeConfig, StoreConfig};

use crate::cli::{Cli, Commands};
use crate::log;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Parsed CLI arguments, attached after deserialization
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Where the config file was found, absolute
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root, the config file's parent directory
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Remote theme store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            build: BuildConfig::default(),
            serve: ServeConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Locate, parse, and validate the project configuration.
    ///
    /// The config file is searched upward from the current directory; its
    /// parent becomes the project root all relative paths resolve against.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)?;

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let (mut config, ignored) = Self::parse_with_ignored(&content)?;

        for field in &ignored {
            log!("config"; "unknown field ignored: {}", field);
        }

        config.config_path = config_path;
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse TOML content, collecting unknown fields instead of failing.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .context("failed to parse vitrine.toml")?;
        Ok((config, ignored))
    }

    /// Apply CLI overrides and normalize paths against the project root.
    fn finalize(&mut self, cli: &'static Cli) {
        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
            if let Some(watch) = watch {
                self.serve.watch = *watch;
            }
        }

        if cli.verbose() {
            crate::logger::set_verbose(true);
        }

        self.build.normalize(&self.root);
    }

    /// Validate paths and section contents.
    fn validate(&self) -> Result<()> {
        if !self.build.source.exists() {
            bail!(
                "source directory not found: {} (set [build] source in vitrine.toml)",
                self.build.source.display()
            );
        }

        // A local build touches no remote; only serve and deploy need the
        // store section filled in
        if let Some(cli) = self.cli
            && !matches!(cli.command, Commands::Build { .. })
        {
            self.store.validate()?;
        }
        Ok(())
    }

    /// Absolute distribution root (bundler output, upload origin).
    pub fn dist_dir(&self) -> &Path {
        &self.build.output
    }

    /// Store preview URL shown on clean compiles and opened on startup.
    pub fn preview_url(&self) -> String {
        format!(
            "https://{}?preview_theme_id={}",
            self.store.store, self.store.theme_id
        )
    }

    /// Origin allowed by the dev server's CORS header.
    pub fn store_origin(&self) -> String {
        format!("https://{}", self.store.store)
    }
}

/// Search for the config file upward from the current directory.
fn find_config_file(name: &Path) -> Result<PathBuf> {
    if name.is_absolute() {
        if name.exists() {
            return Ok(name.to_path_buf());
        }
        bail!("config file not found: {}", name.display());
    }

    let cwd = std::env::current_dir().context("failed to get current working directory")?;
    let mut dir = cwd.as_path();
    loop {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Ok(crate::utils::normalize_path(&candidate));
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => bail!(
                "config file '{}' not found in {} or any parent directory",
                name.display(),
                cwd.display()
            ),
        }
    }
}

/// Parse a config from a TOML string with an empty root (tests only).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (config, _) = Config::parse_with_ignored(content).expect("test config should parse");
    config
}
