//! Parse command implementation.

use anyhow::Result;
use clap::Args;

use fsreg_locator::PackageSpecifier;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Package specifier (e.g., "fs:foo@1.0.0/lib/index.js")
    pub specifier: String,
}

/// Runs the parse command.
///
/// # Errors
///
/// Returns an error if the specifier is not an `fs:` specifier.
pub fn run(args: &ParseArgs) -> Result<()> {
    let Some(spec) = PackageSpecifier::parse(&args.specifier) else {
        anyhow::bail!(
            "Not a filesystem package specifier: {} (expected fs:<name>[@<version>][/<path>])",
            args.specifier
        );
    };

    println!("Name:    {}", spec.name);
    println!("Version: {}", spec.version.as_deref().unwrap_or("-"));
    println!("Path:    {}", spec.path.as_deref().unwrap_or("-"));
    Ok(())
}
