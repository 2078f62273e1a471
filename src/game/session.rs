use super::{Board, Direction, TickOutcome};
use crate::scores::NewScore;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// One player's pass through the game: name entry, play, and the game-over
/// screen with the outcome of saving the score.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    board: Board<R>,
    player: String,
    phase: Phase,
    save_status: SaveStatus,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(rng: R) -> Session<R> {
        Session {
            board: Board::new(rng),
            player: String::new(),
            phase: Phase::NotStarted,
            save_status: SaveStatus::Idle,
        }
    }

    /// Advance the game by one tick.
    ///
    /// Returns the score to submit when, and only when, this tick ended the
    /// game.  Outside of [`Phase::Running`] this does nothing.
    pub(crate) fn tick(&mut self) -> Option<NewScore> {
        if self.phase != Phase::Running {
            return None;
        }
        match self.board.tick() {
            TickOutcome::Moved | TickOutcome::Ate => None,
            TickOutcome::Collided(collision) => {
                tracing::debug!(
                    ?collision,
                    direction = ?self.board.direction(),
                    length = self.board.snake().len(),
                    score = self.board.score(),
                    "snake crashed"
                );
                self.phase = Phase::GameOver;
                self.save_status = SaveStatus::Pending;
                Some(NewScore {
                    name: self.player.clone(),
                    score: i32::try_from(self.board.score()).unwrap_or(i32::MAX),
                })
            }
        }
    }

    /// Return to the name entry screen with a fresh board.  The player's
    /// name is kept so that it can be offered again.
    pub(crate) fn reset(&mut self) {
        self.board.reset();
        self.phase = Phase::NotStarted;
        self.save_status = SaveStatus::Idle;
    }
}

impl<R> Session<R> {
    /// Begin play as `name`.  Leading & trailing whitespace is ignored, and
    /// a name with nothing left is refused.
    pub(crate) fn start(&mut self, name: &str) -> Result<(), StartError> {
        if self.phase != Phase::NotStarted {
            return Err(StartError::AlreadyStarted);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyName);
        }
        self.player = String::from(name);
        self.phase = Phase::Running;
        Ok(())
    }

    /// Steer the snake.  Ignored unless the game is running; see
    /// [`Board::set_direction()`] for when a turn is refused.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        self.phase == Phase::Running && self.board.set_direction(direction)
    }

    /// Record how the submission of the final score turned out.  Results
    /// arriving when no submission is outstanding are dropped.
    pub(crate) fn record_save(&mut self, saved: bool) {
        if self.phase == Phase::GameOver && self.save_status == SaveStatus::Pending {
            self.save_status = if saved {
                SaveStatus::Success
            } else {
                SaveStatus::Error
            };
        }
    }

    pub(crate) fn board(&self) -> &Board<R> {
        &self.board
    }

    pub(crate) fn player(&self) -> &str {
        &self.player
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn save_status(&self) -> SaveStatus {
        self.save_status
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    NotStarted,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SaveStatus {
    #[default]
    Idle,
    /// The final score has been sent and no answer has come back yet
    Pending,
    Success,
    Error,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Idle => Ok(()),
            SaveStatus::Pending => write!(f, "Saving score…"),
            SaveStatus::Success => write!(f, "Score saved!"),
            SaveStatus::Error => write!(f, "{}", crate::consts::SAVE_FAILED_MESSAGE),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum StartError {
    #[error("enter a name to start")]
    EmptyName,
    #[error("a game is already in progress")]
    AlreadyStarted,
}
