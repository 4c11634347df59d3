//! Command-line interface for strictly_mastermind.

use clap::{Parser, Subcommand};
use strictly_mastermind::Difficulty;

/// Strictly Mastermind - crack the hidden number code
#[derive(Parser, Debug)]
#[command(name = "strictly_mastermind")]
#[command(about = "Turn-based code-breaking game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "mastermind.toml")]
    pub config: std::path::PathBuf,

    /// SQLite database path (overrides config and MASTERMIND_DB)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Keep sessions in memory only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Generate patterns locally instead of calling Random.org
    #[arg(long, global = true)]
    pub local: bool,

    /// Fall back to local generation if Random.org is unreachable
    #[arg(long, global = true)]
    pub fallback: bool,

    /// Log at info level to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new game
    Play {
        /// Difficulty tier (defaults to the configured one)
        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,
    },

    /// Continue a saved game
    Resume {
        /// ID printed when the game was started
        game_id: String,
    },

    /// List saved games
    List,
}
