//! Two-player chess at one terminal.

mod config;
mod render;
mod session;

use clap::{Parser, Subcommand};
use config::CliConfig;
use chess_rules::Game;
use chess_store::SnapshotStore;

#[derive(Parser)]
#[command(name = "hotseat")]
#[command(about = "Two-player chess at one terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game
    New {
        /// Name of the player commanding White
        #[arg(long, default_value = "White")]
        white: String,
        /// Name of the player commanding Black
        #[arg(long, default_value = "Black")]
        black: String,
    },
    /// Resume a saved game
    Resume {
        /// Key the game was saved under
        key: String,
    },
    /// List saved games
    List,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = CliConfig::load().unwrap_or_default();
    let store = SnapshotStore::new(config.save_dir.clone());

    match cli.command {
        Commands::New { white, black } => {
            tracing::info!(%white, %black, "starting new game");
            session::run(Game::new(white, black), &store)
        }
        Commands::Resume { key } => {
            let snapshot = store.load(&key)?;
            let game = Game::from_snapshot(&snapshot)?;
            tracing::info!(key, "game resumed");
            session::run(game, &store)
        }
        Commands::List => {
            let keys = store.list()?;
            if keys.is_empty() {
                println!("No saved games in {}.", store.dir().display());
            } else {
                for key in keys {
                    println!("{key}");
                }
            }
            Ok(())
        }
    }
}
