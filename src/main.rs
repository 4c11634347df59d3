//! Strictly Mastermind - command-line game.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_mastermind::{
    AppConfig, Console, FallbackPolicy, Game, GameRepository, GameStatus, GeneratorSource,
    InMemoryGameRepository, InputValidator, LocalGenerator, NumberGenerator, RandomOrgGenerator,
    SqliteGameRepository, StorageBackend,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Command::Play { difficulty } => {
            let difficulty = difficulty.unwrap_or(*config.difficulty());
            run_new_game(&config, difficulty)
        }
        Command::Resume { ref game_id } => run_resume(&config, game_id),
        Command::List => run_list(&config),
    }
}

/// Installs a stderr subscriber so stdout stays free for the game.
fn initialize_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Merges the config file, environment, and command-line flags.
#[instrument(skip(cli), fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)?.with_env_overrides();

    if let Some(path) = &cli.db_path {
        config = config.with_db_path(path.clone());
    }
    if cli.memory {
        config = config.with_storage(StorageBackend::Memory);
    }
    if cli.local {
        config = config.with_generator(GeneratorSource::Local);
    }
    if cli.fallback {
        config = config.with_fallback(FallbackPolicy::LocalRandom);
    }

    info!(
        storage = %config.storage(),
        generator = %config.generator(),
        fallback = %config.fallback(),
        "Configuration resolved"
    );
    Ok(config)
}

#[instrument(skip(config))]
fn open_repository(config: &AppConfig) -> Result<Box<dyn GameRepository>> {
    match config.storage() {
        StorageBackend::Sqlite => {
            let repository = SqliteGameRepository::new(config.db_path().clone())
                .with_context(|| format!("Failed to open database '{}'", config.db_path()))?;
            Ok(Box::new(repository))
        }
        StorageBackend::Memory => Ok(Box::new(InMemoryGameRepository::new())),
    }
}

#[instrument(skip(config))]
fn build_generator(config: &AppConfig) -> Result<Box<dyn NumberGenerator>> {
    match config.generator() {
        GeneratorSource::RandomOrg => {
            let generator = RandomOrgGenerator::new(
                config.random_org_url().clone(),
                *config.max_retries(),
                config.request_timeout(),
                *config.fallback(),
            )?;
            Ok(Box::new(generator))
        }
        GeneratorSource::Local => Ok(Box::new(LocalGenerator::new())),
    }
}

/// Starts and plays a new game.
#[instrument(skip(config))]
fn run_new_game(config: &AppConfig, difficulty: strictly_mastermind::Difficulty) -> Result<()> {
    let repository = open_repository(config)?;
    let generator = build_generator(config)?;

    let mut game = Game::create_new(repository, &generator, difficulty.config())
        .context("Could not start a new game")?;
    info!(session_id = %game.id(), "Starting new game");

    play(&mut game, config)
}

/// Resumes a saved game.
#[instrument(skip(config))]
fn run_resume(config: &AppConfig, game_id: &str) -> Result<()> {
    let id = InputValidator::validate_game_id(game_id)?;
    let repository = open_repository(config)?;

    let mut game = Game::load_existing(repository, &id)?;
    play(&mut game, config)
}

/// Prints saved games.
#[instrument(skip(config))]
fn run_list(config: &AppConfig) -> Result<()> {
    let games = match config.storage() {
        StorageBackend::Sqlite => {
            SqliteGameRepository::new(config.db_path().clone())?.list_games()?
        }
        StorageBackend::Memory => {
            println!("In-memory storage keeps no games between runs.");
            return Ok(());
        }
    };

    if games.is_empty() {
        println!("No saved games.");
        return Ok(());
    }
    for summary in games {
        println!(
            "{}  {:<11}  {}/{} attempts  updated {}",
            summary.id(),
            summary.status().to_string(),
            summary.attempts(),
            summary.max_attempts(),
            summary.updated_at().format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn play<R: GameRepository>(game: &mut Game<R>, config: &AppConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout())
        .resumable(*config.storage() == StorageBackend::Sqlite);
    let status = console.run(game)?;
    if status == GameStatus::InProgress {
        info!(session_id = %game.id(), "Game paused");
    }
    Ok(())
}
