// ABOUTME: CLI entry point for hg-git-migrator
// ABOUTME: Parses commands and routes to appropriate handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hg_git_migrator::commands;
use hg_git_migrator::config::MigrationConfig;

#[derive(Parser)]
#[command(name = "hg-git-migrator")]
#[command(about = "Interactive squash migration from Mercurial to Git", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive migration sequence
    Migrate {
        /// Mercurial repository URL to migrate from
        #[arg(long)]
        source: Option<String>,
        /// Git repository URL that receives the squashed commit
        #[arg(long)]
        dest: Option<String>,
        /// Directory that holds both working clones (default: migration-work)
        #[arg(long)]
        work_dir: Option<PathBuf>,
        /// Path to a migration-config.toml supplying URLs and paths
        #[arg(long)]
        config: Option<PathBuf>,
        /// Delete pre-existing working directories without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Verify that git and hg are installed and usable
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            source,
            dest,
            work_dir,
            config,
            yes,
        } => {
            let config = MigrationConfig::resolve(config.as_deref(), source, dest, work_dir, yes)?;
            commands::migrate(config).await
        }
        Commands::Check => commands::check().await,
    }
}
