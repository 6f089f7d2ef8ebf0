//! Locate command implementation.

use anyhow::{Context, Result};
use clap::Args;

use fsreg_locator::{LocateResult, RegistryLocator};

use super::{open_locator, Environment, GlobalArgs, OutputFormat};

/// Arguments for the locate command.
#[derive(Args)]
pub struct LocateArgs {
    /// Package name
    pub package: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Runs the locate command.
///
/// # Errors
///
/// Returns an error if the registry cannot be opened or the package name is
/// unsafe.
pub async fn run(global: &GlobalArgs, env: &Environment, args: &LocateArgs) -> Result<()> {
    let locator = open_locator(global, env)?;
    let result = locator
        .locate(&args.package)
        .await
        .with_context(|| format!("Failed to locate '{}'", args.package))?;

    match args.format {
        OutputFormat::Text => println!("{}", describe(&args.package, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn describe(package: &str, result: &LocateResult) -> String {
    match result {
        LocateResult::Redirect { target } => format!("{package} -> {target} (alias)"),
        LocateResult::NotFound => format!("{package}: not found"),
        LocateResult::Found { dir } => format!("{package}: {}", dir.display()),
    }
}
