//! Download command implementation.
//!
//! Extracts a release archive into a directory and prints its manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use fsreg_locator::RegistryLocator;

use super::{open_locator, Environment, GlobalArgs};

/// Arguments for the download command.
#[derive(Args)]
pub struct DownloadArgs {
    /// Package name
    pub package: String,

    /// Version token (e.g., "1.0.0", "latest")
    pub version: String,

    /// Directory to extract the release into
    pub target_dir: PathBuf,
}

/// Runs the download command.
///
/// # Errors
///
/// Returns an error if the archive is missing or corrupt, or if the
/// extracted release has no valid `package.json`.
pub async fn run(global: &GlobalArgs, env: &Environment, args: &DownloadArgs) -> Result<()> {
    info!(
        package = %args.package,
        version = %args.version,
        target = %args.target_dir.display(),
        "Downloading package"
    );

    let locator = open_locator(global, env)?;
    let manifest = locator
        .download(&args.package, &args.version, "", None, &args.target_dir)
        .await
        .with_context(|| format!("Failed to download {}@{}", args.package, args.version))?;

    println!("✓ Extracted to {}", args.target_dir.display());
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
