//! Lookup command implementation.
//!
//! Lists the release archives available for a package.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use fsreg_locator::{LookupResult, RegistryLocator, VersionEntry};

use super::{open_locator, Environment, GlobalArgs, OutputFormat};

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Package name
    pub package: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Runs the lookup command.
///
/// # Errors
///
/// Returns an error if the registry cannot be opened or the package
/// directory cannot be read.
pub async fn run(global: &GlobalArgs, env: &Environment, args: &LookupArgs) -> Result<()> {
    let locator = open_locator(global, env)?;
    let result = locator
        .lookup(&args.package)
        .await
        .with_context(|| format!("Failed to look up '{}'", args.package))?;

    if let Some(versions) = result.versions() {
        info!(package = %args.package, count = versions.len(), "Versions found");
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&args.package, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn render_text(package: &str, result: &LookupResult) -> String {
    let LookupResult::Versions(versions) = result else {
        return format!("{package}: not found\n");
    };

    if versions.is_empty() {
        return format!("{package}: no releases\n");
    }

    let mut out = format!("{package}:\n");
    for (token, entry) in ordered(versions) {
        let marker = if entry.stable { "" } else { " (unstable)" };
        out.push_str(&format!("  {token}{marker}\n    {}\n", entry.hash));
    }
    out
}

/// Orders stable releases newest first, followed by the other tokens.
fn ordered(versions: &BTreeMap<String, VersionEntry>) -> Vec<(&String, &VersionEntry)> {
    let mut entries: Vec<_> = versions.iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        match (semver::Version::parse(a), semver::Version::parse(b)) {
            (Ok(a), Ok(b)) => b.cmp(&a),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    });
    entries
}
