use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake on the grid.
///
/// Segments are stored head first.  While the snake is alive no two segments
/// share a cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Position>,
}

impl Snake {
    /// Create a snake occupying `segments`, listed head first
    pub(crate) fn new<I: IntoIterator<Item = Position>>(segments: I) -> Snake {
        Snake {
            segments: segments.into_iter().collect(),
        }
    }

    /// Create the snake every game starts with
    pub(crate) fn initial() -> Snake {
        Snake::new(consts::INITIAL_SNAKE)
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // Every constructor in use is fed a non-empty sequence, and `slither()`
        // never shrinks the snake.
        self.segments.front().copied().unwrap_or(Position::ORIGIN)
    }

    /// Return the positions of all segments, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Is any segment of the snake (tail included) at `pos`?
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Move the head to `head`.  If `grow` is false, the tail segment is
    /// dropped so that the length stays the same.
    pub(crate) fn slither(&mut self, head: Position, grow: bool) {
        self.segments.push_front(head);
        if !grow {
            let _ = self.segments.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snake() {
        let snake = Snake::initial();
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(
            snake.segments(),
            &VecDeque::from([
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ])
        );
    }

    #[test]
    fn slither_keeps_length() {
        let mut snake = Snake::initial();
        snake.slither(Position::new(11, 10), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(11, 10));
        assert!(!snake.occupies(Position::new(8, 10)));
    }

    #[test]
    fn slither_and_grow() {
        let mut snake = Snake::initial();
        snake.slither(Position::new(10, 9), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(10, 9));
        assert!(snake.occupies(Position::new(8, 10)));
    }
}
