//! Configure command implementation.
//!
//! Prompts for the registry base directory and saves it to the
//! configuration file.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use tracing::info;

use fsreg_locator::{FilesystemLocator, LocatorConfig, LocatorError, Prompt, RegistryLocator};

use super::{config_path, Environment, GlobalArgs};

/// Arguments for the configure command.
#[derive(Args)]
pub struct ConfigureArgs {
    /// Print the resulting configuration without saving it
    #[arg(long)]
    pub dry_run: bool,
}

/// Line-based prompt on stdin/stdout.
pub struct StdinPrompt;

#[async_trait]
impl Prompt for StdinPrompt {
    async fn input(&self, message: &str, default: Option<&str>) -> fsreg_locator::Result<String> {
        let message = message.to_string();
        let default = default.map(str::to_string);

        tokio::task::spawn_blocking(move || {
            let stdin = io::stdin();
            read_answer(&mut stdin.lock(), &mut io::stdout(), &message, default.as_deref())
        })
        .await?
        .map_err(|e| LocatorError::Prompt {
            message: e.to_string(),
        })
    }
}

/// Writes the prompt and reads one line, falling back to `default` on an
/// empty answer.
fn read_answer(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
    default: Option<&str>,
) -> io::Result<String> {
    match default {
        Some(default) => write!(output, "{message}[{default}] ")?,
        None => write!(output, "{message}")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Runs the configure command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, prompted for or
/// saved.
pub async fn run(global: &GlobalArgs, env: &Environment, args: &ConfigureArgs) -> Result<()> {
    let path = config_path(global);
    let config = LocatorConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let config = FilesystemLocator::configure(config, env.base_dir.as_deref(), &StdinPrompt)
        .await
        .context("Failed to configure locator")?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    config
        .save(&path)
        .with_context(|| format!("Failed to save configuration to {}", path.display()))?;
    info!(path = %path.display(), "Configuration saved");

    println!("✓ Configuration saved to {}", path.display());
    Ok(())
}
