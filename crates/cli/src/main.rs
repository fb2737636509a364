//! FreezeGuard CLI - Main entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use freezeguard_cli::{commands, AppContext};
use freezeguard_core::{Address, Timestamp};

#[derive(Parser)]
#[command(name = "freezeguard")]
#[command(about = "FreezeGuard - time-windowed user freeze checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a transfer is allowed
    Check {
        /// Registry snapshot (JSON)
        #[arg(long)]
        registry: PathBuf,
        /// Engine config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Sender address
        #[arg(long)]
        from: Address,
        /// Receiver address
        #[arg(long)]
        to: Address,
        /// Treat unregistered parties as unrestricted
        #[arg(long)]
        allow_not_found: bool,
        /// Evaluate at this Unix timestamp instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },

    /// Show the user and freeze profile behind an address
    Inspect {
        /// Registry snapshot (JSON)
        #[arg(long)]
        registry: PathBuf,
        /// Engine config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Address to resolve
        #[arg(long)]
        address: Address,
        /// Evaluate at this Unix timestamp instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            registry,
            config,
            from,
            to,
            allow_not_found,
            at,
        } => {
            let ctx = AppContext::load(&registry, config.as_deref())?;
            let verdict = commands::check(&ctx, from, to, allow_not_found, at)?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }

        Commands::Inspect {
            registry,
            config,
            address,
            at,
        } => {
            let ctx = AppContext::load(&registry, config.as_deref())?;
            let inspection = commands::inspect(&ctx, address, at)?;
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
    }

    Ok(())
}
