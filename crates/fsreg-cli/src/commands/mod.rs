//! CLI commands and argument parsing.

pub mod configure;
pub mod download;
pub mod locate;
pub mod lookup;
pub mod parse;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use fsreg_locator::{FilesystemLocator, LocatorConfig, LocatorOptions, BASEDIR_ENV};

/// fsreg - Offline package registry served from a directory tree
#[derive(Parser)]
#[command(name = "fsreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Registry base directory (overrides the saved configuration)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Endpoint API version to declare to the locator
    #[arg(long, global = true, default_value = "2.0")]
    pub api_version: String,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Interactively set the registry base directory
    Configure(configure::ConfigureArgs),

    /// Resolve a package name to an alias or directory
    Locate(locate::LocateArgs),

    /// List available versions of a package
    Lookup(lookup::LookupArgs),

    /// Extract a package release into a directory
    Download(download::DownloadArgs),

    /// Parse an `fs:` package specifier
    Parse(parse::ParseArgs),

    /// Print version information
    Version,
}

/// Output format for query commands.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Process environment, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Value of the base directory environment variable.
    pub base_dir: Option<PathBuf>,
}

impl Environment {
    /// Captures the variables the locator cares about.
    pub fn capture() -> Self {
        Self {
            base_dir: std::env::var_os(BASEDIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Returns the configuration file path.
pub fn config_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fsreg")
            .join("config.json")
    })
}

/// Picks the base directory: flag, then saved configuration, then environment.
pub fn resolve_base_dir(
    global: &GlobalArgs,
    env: &Environment,
    config: &LocatorConfig,
) -> Option<PathBuf> {
    global
        .base_dir
        .clone()
        .or_else(|| config.base_dir.clone())
        .or_else(|| env.base_dir.clone())
}

/// Builds a locator from the global options, saved configuration and environment.
pub fn open_locator(global: &GlobalArgs, env: &Environment) -> Result<FilesystemLocator> {
    let path = config_path(global);
    let config = LocatorConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let mut options = LocatorOptions::new(&global.api_version);
    if let Some(base_dir) = resolve_base_dir(global, env, &config) {
        options = options.with_base_dir(base_dir);
    }
    debug!(?options, "Opening locator");

    FilesystemLocator::new(options).context("Failed to open registry")
}
