//! Phalanx - Threat-Feed Block-List Builder
//!
//! Builds the consolidated block list for a transparent bridging firewall
//! from public threat-intelligence feeds.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use phalanx::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is configured exactly once, here; components never touch it.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { force } => phalanx::commands::init::run(force, &cli.config).await,
        Commands::Update { dry_run } => phalanx::commands::update::run(dry_run, &cli.config).await,
        Commands::Show => phalanx::commands::show::run(&cli.config).await,
        Commands::Check { ip } => phalanx::commands::check::run(&ip, &cli.config).await,
        Commands::Version => {
            println!("phalanx {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
