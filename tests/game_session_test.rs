//! Tests for the session coordinator and its state machine.

use std::cell::Cell;

use strictly_mastermind::{
    Difficulty, Game, GameConfig, GameError, GameRepository, GameStatus, GeneratorError, Guess,
    GuessError, InMemoryGameRepository, LocalGenerator, NumberGenerator, RepositoryError,
    Session,
};

/// Always returns the same digits.
struct FixedGenerator(Vec<u32>);

impl NumberGenerator for FixedGenerator {
    fn generate(&self, _config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        Ok(self.0.clone())
    }
}

/// Always fails, as an exhausted external service would.
struct UnavailableGenerator;

impl NumberGenerator for UnavailableGenerator {
    fn generate(&self, _config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        Err(GeneratorError::new("retries exhausted"))
    }
}

/// Wraps a repository, counting writes and optionally failing reads or writes.
#[derive(Default)]
struct RecordingRepository {
    inner: InMemoryGameRepository,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
    fail_loads: Cell<bool>,
}

impl GameRepository for RecordingRepository {
    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        if self.fail_saves.get() {
            return Err(RepositoryError::Save(strictly_mastermind::DbError::new(
                "disk full",
            )));
        }
        self.saves.set(self.saves.get() + 1);
        self.inner.save(session)
    }

    fn load(&self, id: &str) -> Result<Session, RepositoryError> {
        if self.fail_loads.get() {
            return Err(RepositoryError::Load(strictly_mastermind::DbError::new(
                "unreadable record",
            )));
        }
        self.inner.load(id)
    }
}

fn reference_game(repo: &RecordingRepository) -> Game<&RecordingRepository> {
    Game::create_new(
        repo,
        &FixedGenerator(vec![0, 1, 2, 3]),
        Difficulty::Normal.config(),
    )
    .expect("Create failed")
}

fn feedback_pair(game: &mut Game<&RecordingRepository>, digits: [u32; 4]) -> (usize, usize) {
    let feedback = game
        .submit_guess(Guess::new(digits.to_vec()))
        .expect("Guess failed");
    (*feedback.numbers_correct(), *feedback.positions_correct())
}

#[test]
fn test_create_new_initial_state() {
    let repo = RecordingRepository::default();
    let game = reference_game(&repo);

    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(*game.session().attempts(), 0);
    assert!(game.history().is_empty());
    assert_eq!(game.remaining_attempts(), 10);
    assert!(game.pattern().is_none(), "pattern hidden during play");
    assert_eq!(repo.saves.get(), 1, "creation writes exactly one snapshot");
}

#[test]
fn test_create_new_assigns_unique_uuid_ids() {
    let repo = RecordingRepository::default();
    let a = reference_game(&repo);
    let b = reference_game(&repo);
    assert_ne!(a.id(), b.id());
    assert!(uuid::Uuid::parse_str(a.id()).is_ok());
}

#[test]
fn test_generator_failure_persists_nothing() {
    let repo = RecordingRepository::default();
    let result = Game::create_new(&repo, &UnavailableGenerator, GameConfig::default());
    assert!(matches!(result, Err(GameError::Init(_))));
    assert_eq!(repo.saves.get(), 0);
    assert!(repo.inner.is_empty().expect("Empty check failed"));
}

#[test]
fn test_reference_game_feedback_sequence() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);

    assert_eq!(feedback_pair(&mut game, [4, 5, 6, 7]), (0, 0));
    assert_eq!(feedback_pair(&mut game, [1, 2, 3, 4]), (3, 0));
    assert_eq!(feedback_pair(&mut game, [0, 2, 3, 1]), (4, 1));
    assert_eq!(feedback_pair(&mut game, [2, 1, 5, 3]), (3, 2));

    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.remaining_attempts(), 6);
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.history()[1].guess().digits(), &[1, 2, 3, 4]);
    assert_eq!(repo.saves.get(), 5, "one write per creation and per guess");
}

#[test]
fn test_winning_guess_ends_game_immediately() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);

    feedback_pair(&mut game, [4, 5, 6, 7]);
    assert_eq!(feedback_pair(&mut game, [0, 1, 2, 3]), (4, 4));
    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.is_over());
    assert_eq!(game.remaining_attempts(), 8);
}

#[test]
fn test_win_on_last_attempt_is_won_not_lost() {
    let repo = RecordingRepository::default();
    let config = GameConfig::new(4, 0, 7, 2).expect("Valid config");
    let mut game = Game::create_new(&repo, &FixedGenerator(vec![0, 1, 2, 3]), config)
        .expect("Create failed");

    feedback_pair(&mut game, [7, 7, 7, 7]);
    feedback_pair(&mut game, [0, 1, 2, 3]);
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.remaining_attempts(), 0);
}

#[test]
fn test_exhausting_attempts_loses() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);

    for _ in 0..9 {
        feedback_pair(&mut game, [7, 7, 7, 7]);
        assert_eq!(game.status(), GameStatus::InProgress);
    }
    feedback_pair(&mut game, [7, 7, 7, 7]);

    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.remaining_attempts(), 0);
    assert_eq!(
        game.pattern().map(|p| p.digits().to_vec()),
        Some(vec![0, 1, 2, 3])
    );
}

#[test]
fn test_terminal_game_rejects_guesses() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);
    feedback_pair(&mut game, [0, 1, 2, 3]);
    let saves = repo.saves.get();

    let result = game.submit_guess(Guess::new(vec![0, 1, 2, 3]));
    assert!(matches!(
        result,
        Err(GameError::GameOver {
            status: GameStatus::Won
        })
    ));
    assert_eq!(*game.session().attempts(), 1);
    assert_eq!(repo.saves.get(), saves);
}

#[test]
fn test_wrong_length_guess_does_not_consume_attempt() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);

    let result = game.submit_guess(Guess::new(vec![0, 1, 2]));
    assert!(matches!(
        result,
        Err(GameError::Guess(GuessError::InvalidLength {
            expected: 4,
            actual: 3
        }))
    ));
    assert_eq!(*game.session().attempts(), 0);
    assert_eq!(repo.saves.get(), 1);
}

#[test]
fn test_failed_save_leaves_session_unchanged() {
    let repo = RecordingRepository::default();
    let mut game = reference_game(&repo);
    feedback_pair(&mut game, [4, 5, 6, 7]);

    repo.fail_saves.set(true);
    let result = game.submit_guess(Guess::new(vec![0, 1, 2, 3]));
    assert!(matches!(
        result,
        Err(GameError::Persistence(RepositoryError::Save(_)))
    ));
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(*game.session().attempts(), 1);
    assert_eq!(game.history().len(), 1);

    repo.fail_saves.set(false);
    assert_eq!(feedback_pair(&mut game, [0, 1, 2, 3]), (4, 4));
}

#[test]
fn test_load_existing_resumes_play() {
    let repo = RecordingRepository::default();
    let id = {
        let mut game = reference_game(&repo);
        feedback_pair(&mut game, [1, 2, 3, 4]);
        game.id().to_string()
    };

    let mut resumed = Game::load_existing(&repo, &id).expect("Load failed");
    assert_eq!(*resumed.session().attempts(), 1);
    assert_eq!(resumed.remaining_attempts(), 9);
    assert_eq!(resumed.session().frequency().count(2), 1);
    assert_eq!(feedback_pair(&mut resumed, [0, 1, 2, 3]), (4, 4));
    assert_eq!(resumed.status(), GameStatus::Won);

    let reloaded = Game::load_existing(&repo, &id).expect("Reload failed");
    assert_eq!(reloaded.status(), GameStatus::Won);
    assert_eq!(reloaded.history().len(), 2);
}

#[test]
fn test_load_missing_is_not_found() {
    let repo = RecordingRepository::default();
    let result = Game::load_existing(&repo, "no-such-game");
    assert!(matches!(result, Err(GameError::NotFound { id }) if id == "no-such-game"));
}

#[test]
fn test_duplicate_digit_pattern() {
    let repo = RecordingRepository::default();
    let mut game = Game::create_new(
        &repo,
        &FixedGenerator(vec![1, 2, 1, 2]),
        Difficulty::Normal.config(),
    )
    .expect("Create failed");

    assert_eq!(feedback_pair(&mut game, [1, 1, 2, 2]), (4, 2));
    assert_eq!(feedback_pair(&mut game, [1, 1, 1, 1]), (2, 2));
}

#[test]
fn test_seeded_local_generator_plays_hard_game() {
    let repo = InMemoryGameRepository::new();
    let config = Difficulty::Hard.config();
    let mut game =
        Game::create_new(&repo, &LocalGenerator::seeded(7), config).expect("Create failed");

    let pattern = game.session().pattern().digits().to_vec();
    assert_eq!(pattern.len(), 5);

    let feedback = game.submit_guess(Guess::new(pattern)).expect("Guess failed");
    assert!(feedback.is_winning(5));
    assert_eq!(game.status(), GameStatus::Won);
}

#[test]
fn test_create_new_save_failure_returns_no_game() {
    let repo = RecordingRepository::default();
    repo.fail_saves.set(true);

    let result = Game::create_new(
        &repo,
        &FixedGenerator(vec![0, 1, 2, 3]),
        Difficulty::Normal.config(),
    );
    assert!(matches!(
        result,
        Err(GameError::Persistence(RepositoryError::Save(_)))
    ));
    assert!(repo.inner.is_empty().expect("Empty check failed"));
}

#[test]
fn test_load_failure_is_persistence_not_missing() {
    let repo = RecordingRepository::default();
    let id = reference_game(&repo).id().to_string();

    repo.fail_loads.set(true);
    let result = Game::load_existing(&repo, &id);
    assert!(matches!(
        result,
        Err(GameError::Persistence(RepositoryError::Load(_)))
    ));
}
