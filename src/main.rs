use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doubles_tracker::config::AppConfig;
use doubles_tracker::console::{Console, SelectionMode};
use doubles_tracker::storage::{export_recap, StorageConfig};
use doubles_tracker::{Roster, Session};

#[derive(Parser)]
#[command(name = "doubles-tracker")]
#[command(about = "Doubles round-robin tracker with fair match suggestions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Play {
        /// Player name (repeat 4 to 8 times); asked interactively if omitted
        #[arg(long = "player", short = 'p')]
        players: Vec<String>,

        /// Pick the four players by hand every round
        #[arg(long)]
        manual: bool,

        /// Export the match recap when the session ends
        #[arg(long)]
        export: bool,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting doubles-tracker v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Play {
            players,
            manual,
            export,
        } => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());

            let roster = if players.is_empty() {
                console.collect_roster()?
            } else {
                Roster::new(&players).context("Invalid --player list")?
            };

            let mode = if manual {
                SelectionMode::Manual
            } else {
                SelectionMode::Suggested
            };

            let mut session = Session::new(roster, config.weights);
            console.run(&mut session, mode)?;

            if (export || config.export_recap) && !session.recap().is_empty() {
                let storage = StorageConfig::new(config.data_dir.clone());
                let path = export_recap(&storage, session.recap())?;
                println!("Recap written to {}", path.display());
            }
        }
    }

    Ok(())
}
