mod direction;
mod grid;
mod render;
mod screen;
mod session;
mod snake;
mod ticker;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::Bounds;
pub(crate) use self::session::{Phase, SaveStatus, Session, StartError};
pub(crate) use self::snake::Snake;
pub(crate) use self::ticker::Ticker;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// The simulation proper: a snake, its food, and the score, on a fixed grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board<R = rand::rngs::ThreadRng> {
    rng: R,
    bounds: Bounds,
    snake: Snake,
    food: Position,
    direction: Direction,
    score: u32,
}

impl<R: Rng> Board<R> {
    pub(crate) fn new(rng: R) -> Board<R> {
        Board {
            rng,
            bounds: Bounds::GRID,
            snake: Snake::initial(),
            food: consts::INITIAL_FOOD,
            direction: consts::INITIAL_DIRECTION,
            score: 0,
        }
    }

    /// Advance the snake one cell in its current direction.
    ///
    /// On a collision nothing is changed and the kind of collision is
    /// reported.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        let Some(head) = self.direction.advance(self.snake.head(), self.bounds) else {
            return TickOutcome::Collided(Collision::Wall);
        };
        if self.snake.occupies(head) {
            return TickOutcome::Collided(Collision::Body);
        }
        let ate = head == self.food;
        self.snake.slither(head, ate);
        if ate {
            self.score += 1;
            self.generate_food();
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Move the food to a uniformly random cell.  The snake is not consulted,
    /// so the food may land on top of it.
    pub(crate) fn generate_food(&mut self) {
        self.food = self.bounds.random_position(&mut self.rng);
    }

    /// Put the snake, its direction, and the score back to how they are at
    /// the start of a game, and roll a fresh food position.
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::initial();
        self.direction = consts::INITIAL_DIRECTION;
        self.score = 0;
        self.generate_food();
    }
}

impl<R> Board<R> {
    /// Point the snake in `direction` unless that would turn it straight back
    /// on itself.  Returns whether the direction was adopted.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Position {
        self.food
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    Moved,
    Ate,
    Collided(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The snake tried to leave the grid
    Wall,
    /// The snake ran into one of its own segments
    Body,
}
