//! fsreg CLI - Operator front-end for the filesystem registry locator.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fsreg_cli=info,fsreg_locator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let env = commands::Environment::capture();

    match cli.command {
        Commands::Configure(args) => commands::configure::run(&cli.global, &env, &args).await,
        Commands::Locate(args) => commands::locate::run(&cli.global, &env, &args).await,
        Commands::Lookup(args) => commands::lookup::run(&cli.global, &env, &args).await,
        Commands::Download(args) => commands::download::run(&cli.global, &env, &args).await,
        Commands::Parse(args) => commands::parse::run(&args),
        Commands::Version => {
            println!("fsreg {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
