//! Line-based interactive play.

use crate::db::GameRepository;
use crate::games::mastermind::{Game, GameError, GameStatus, GuessError, InputValidator};
use derive_more::{Display, Error, From};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Failure that ends a console session.
#[derive(Debug, Display, Error, From)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    #[display("Console I/O error: {_0}")]
    Io(std::io::Error),

    /// The game could not continue (e.g. persistence failed).
    #[display("{_0}")]
    Game(GameError),
}

/// Drives a [`Game`] from a line-oriented reader and writer.
#[derive(Debug)]
pub struct Console<I, O> {
    input: I,
    output: O,
    resumable: bool,
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Creates a console over `input` and `output`.
    ///
    /// Quitting tells the player how to resume; see [`Console::resumable`].
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            resumable: true,
        }
    }

    /// Sets whether a quit game outlives the process (false for in-memory
    /// storage).
    pub fn resumable(mut self, resumable: bool) -> Self {
        self.resumable = resumable;
        self
    }

    /// Returns the output sink.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Plays until the game ends, the player quits, or input runs out.
    ///
    /// Returns the status at exit; `InProgress` means the player left early
    /// and the session can be resumed from durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on I/O failure or a non-recoverable game
    /// error. Invalid guesses are reported and re-prompted instead.
    #[instrument(skip_all, fields(session_id = %game.id()))]
    pub fn run<R: GameRepository>(
        &mut self,
        game: &mut Game<R>,
    ) -> Result<GameStatus, ConsoleError> {
        let config = *game.config();
        let validator = InputValidator::new(config);

        writeln!(self.output, "Game ID: {}", game.id())?;
        writeln!(
            self.output,
            "Guess the {} numbers between {} and {}. Type 'history' to review, 'quit' to leave.",
            config.pattern_length(),
            config.min_number(),
            config.max_number()
        )?;
        if !game.history().is_empty() {
            self.print_history(game)?;
        }

        while !game.is_over() {
            write!(self.output, "[{} left] guess> ", game.remaining_attempts())?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                debug!("Input closed");
                writeln!(self.output)?;
                return Ok(game.status());
            }
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Input is not valid UTF-8");
                    let input = String::from_utf8_lossy(e.as_bytes()).trim().to_string();
                    writeln!(self.output, "{}", GuessError::NonNumeric { input })?;
                    continue;
                }
            };

            match line.trim() {
                "quit" | "q" => {
                    info!(resumable = self.resumable, "Player left the game");
                    if self.resumable {
                        writeln!(self.output, "Game saved. Resume with ID {}", game.id())?;
                    } else {
                        writeln!(
                            self.output,
                            "Game left. In-memory games cannot be resumed after exit."
                        )?;
                    }
                    return Ok(game.status());
                }
                "history" | "h" => {
                    self.print_history(game)?;
                    continue;
                }
                _ => {}
            }

            let guess = match validator.validate_guess(&line) {
                Ok(guess) => guess,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            match game.submit_guess(guess) {
                Ok(feedback) => writeln!(self.output, "{}", feedback)?,
                Err(GameError::Guess(e)) => {
                    warn!(error = %e, "Guess rejected by game");
                    writeln!(self.output, "{}", e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.print_ending(game)?;
        Ok(game.status())
    }

    fn print_history<R>(&mut self, game: &Game<R>) -> Result<(), ConsoleError> {
        if game.history().is_empty() {
            writeln!(self.output, "No guesses yet.")?;
            return Ok(());
        }
        for (round, record) in game.history().iter().enumerate() {
            writeln!(
                self.output,
                "{:>2}. {}  ->  {}",
                round + 1,
                record.guess(),
                record.feedback()
            )?;
        }
        Ok(())
    }

    fn print_ending<R>(&mut self, game: &Game<R>) -> Result<(), ConsoleError> {
        match game.status() {
            GameStatus::Won => writeln!(
                self.output,
                "Congrats! You cracked the code in {} attempts.",
                game.session().attempts()
            )?,
            GameStatus::Lost => {
                if let Some(pattern) = game.pattern() {
                    writeln!(self.output, "Out of attempts. The code was {}.", pattern)?;
                }
            }
            GameStatus::InProgress => {}
        }
        Ok(())
    }
}
