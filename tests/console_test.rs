//! Tests for line-based console play.

use std::io::Cursor;

use strictly_mastermind::{
    Console, Difficulty, Game, GameConfig, GameStatus, GeneratorError, InMemoryGameRepository,
    NumberGenerator,
};

struct FixedGenerator(Vec<u32>);

impl NumberGenerator for FixedGenerator {
    fn generate(&self, _config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        Ok(self.0.clone())
    }
}

/// Plays `input` against a fresh reference game and returns the final
/// status along with everything written to the console.
fn play_script(
    repo: &InMemoryGameRepository,
    config: GameConfig,
    input: &str,
) -> (GameStatus, String, String) {
    let mut game = Game::create_new(repo, &FixedGenerator(vec![0, 1, 2, 3]), config)
        .expect("Create failed");
    let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());

    let status = console.run(&mut game).expect("Console failed");
    let output = String::from_utf8(console.into_output()).expect("Output not UTF-8");
    (status, output, game.id().to_string())
}

#[test]
fn test_console_win() {
    let repo = InMemoryGameRepository::new();
    let (status, output, id) =
        play_script(&repo, Difficulty::Normal.config(), "4567\n0 1 2 3\n");

    assert_eq!(status, GameStatus::Won);
    assert!(output.contains(&format!("Game ID: {id}")));
    assert!(output.contains("[10 left] guess> "));
    assert!(output.contains("0 correct numbers and 0 correct positions"));
    assert!(output.contains("4 correct numbers and 4 correct positions"));
    assert!(output.contains("Congrats! You cracked the code in 2 attempts."));
}

#[test]
fn test_console_invalid_input_reprompts_without_using_attempt() {
    let repo = InMemoryGameRepository::new();
    let (status, output, _) = play_script(
        &repo,
        Difficulty::Normal.config(),
        "\nabcd\n012\n0189\n0123\n",
    );

    assert_eq!(status, GameStatus::Won);
    assert!(output.contains("Input cannot be empty"));
    assert!(output.contains("Input must contain only numbers, got 'abcd'"));
    assert!(output.contains("Guess must be 4 numbers long, got 3"));
    assert!(output.contains("Number 8 must be between 0 and 7"));
    assert!(output.contains("Congrats! You cracked the code in 1 attempts."));
}

#[test]
fn test_console_quit_leaves_game_resumable() {
    let repo = InMemoryGameRepository::new();
    let (status, output, id) =
        play_script(&repo, Difficulty::Normal.config(), "1234\nquit\n0123\n");

    assert_eq!(status, GameStatus::InProgress);
    assert!(output.contains(&format!("Game saved. Resume with ID {id}")));

    let resumed = Game::load_existing(&repo, &id).expect("Load failed");
    assert_eq!(*resumed.session().attempts(), 1);
    assert_eq!(resumed.status(), GameStatus::InProgress);
}

#[test]
fn test_console_end_of_input_returns_current_status() {
    let repo = InMemoryGameRepository::new();
    let (status, _, _) = play_script(&repo, Difficulty::Normal.config(), "4567\n");
    assert_eq!(status, GameStatus::InProgress);
}

#[test]
fn test_console_history() {
    let repo = InMemoryGameRepository::new();
    let (_, output, _) = play_script(&repo, Difficulty::Normal.config(), "history\n1234\nh\nq\n");

    assert!(output.contains("No guesses yet."));
    assert!(output.contains(" 1. 1 2 3 4  ->  3 correct numbers and 0 correct positions"));
}

#[test]
fn test_console_loss_reveals_pattern() {
    let repo = InMemoryGameRepository::new();
    let config = GameConfig::new(4, 0, 7, 2).expect("Valid config");
    let (status, output, _) = play_script(&repo, config, "7777\n6666\n0123\n");

    assert_eq!(status, GameStatus::Lost);
    assert!(output.contains("[1 left] guess> "));
    assert!(output.contains("Out of attempts. The code was 0 1 2 3."));
    assert!(!output.contains("Congrats"));
}

#[test]
fn test_console_resumed_game_shows_history() {
    let repo = InMemoryGameRepository::new();
    let (_, _, id) = play_script(&repo, Difficulty::Normal.config(), "4567\nq\n");

    let mut game = Game::load_existing(&repo, &id).expect("Load failed");
    let mut console = Console::new(Cursor::new("0123\n".to_string()), Vec::new());
    let status = console.run(&mut game).expect("Console failed");
    let output = String::from_utf8(console.into_output()).expect("Output not UTF-8");

    assert_eq!(status, GameStatus::Won);
    assert!(output.contains(" 1. 4 5 6 7  ->  0 correct numbers and 0 correct positions"));
    assert!(output.contains("[9 left] guess> "));
}

#[test]
fn test_console_invalid_utf8_reprompts() {
    let repo = InMemoryGameRepository::new();
    let mut game = Game::create_new(
        &repo,
        &FixedGenerator(vec![0, 1, 2, 3]),
        Difficulty::Normal.config(),
    )
    .expect("Create failed");
    let mut console = Console::new(Cursor::new(b"\xff\xfe\n0123\n".to_vec()), Vec::new());

    let status = console.run(&mut game).expect("Console failed");
    let output = String::from_utf8(console.into_output()).expect("Output not UTF-8");

    assert_eq!(status, GameStatus::Won);
    assert!(output.contains("Input must contain only numbers"));
    assert_eq!(*game.session().attempts(), 1);
}

#[test]
fn test_console_quit_without_durable_storage() {
    let repo = InMemoryGameRepository::new();
    let mut game = Game::create_new(
        &repo,
        &FixedGenerator(vec![0, 1, 2, 3]),
        Difficulty::Normal.config(),
    )
    .expect("Create failed");
    let mut console = Console::new(Cursor::new("quit\n".to_string()), Vec::new())
        .resumable(false);

    let status = console.run(&mut game).expect("Console failed");
    let output = String::from_utf8(console.into_output()).expect("Output not UTF-8");

    assert_eq!(status, GameStatus::InProgress);
    assert!(output.contains("In-memory games cannot be resumed"));
    assert!(!output.contains("Resume with ID"));
}
