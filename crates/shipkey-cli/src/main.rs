use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    init::{handle_init_command, handle_remove_command, InitArgs},
    signing::{
        handle_check_command, handle_inspect_command, handle_resolve_command, CheckArgs,
        InspectArgs, ResolveArgs,
    },
};

#[derive(Parser)]
#[command(name = "shipkey")]
#[command(version = shipkey_core::VERSION)]
#[command(about = "Resolve Android release signing from keystore.properties", long_about = None)]
struct Cli {
    /// Android project root (relative storeFile paths resolve against it)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// Signing properties file (relative to the project root)
    #[arg(long, global = true)]
    properties: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved release signing config
    Resolve(ResolveArgs),

    /// Fail unless the given build type can be signed
    Check(CheckArgs),

    /// Report the type of the configured keystore
    Inspect(InspectArgs),

    /// Write a signing properties file
    Init(InitArgs),

    /// Remove the signing properties file
    Remove,
}

fn main() -> Result<()> {
    // Load .env file if present (doesn't override existing env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shipkey_cli=info,shipkey_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let resolved = config::resolve_config(cli.project_root.as_deref(), cli.properties.as_deref());
    tracing::debug!(
        "Project root: {}, properties: {}",
        resolved.project_root.display(),
        resolved.properties_path.display()
    );

    match cli.command {
        Commands::Resolve(args) => handle_resolve_command(&resolved, args)?,
        Commands::Check(args) => handle_check_command(&resolved, args)?,
        Commands::Inspect(args) => handle_inspect_command(&resolved, args)?,
        Commands::Init(args) => handle_init_command(&resolved, args)?,
        Commands::Remove => handle_remove_command(&resolved)?,
    }

    Ok(())
}
