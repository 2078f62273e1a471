use super::grid::Bounds;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction, or
    /// `None` if that would leave `bounds`.
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        Some(Position { x, y }).filter(|&p| bounds.contains(p))
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BOUNDS: Bounds = Bounds {
        width: 20,
        height: 20,
    };

    #[rstest]
    #[case(Direction::Up, Position::new(4, 7), Some(Position::new(4, 6)))]
    #[case(Direction::Down, Position::new(4, 7), Some(Position::new(4, 8)))]
    #[case(Direction::Left, Position::new(4, 7), Some(Position::new(3, 7)))]
    #[case(Direction::Right, Position::new(4, 7), Some(Position::new(5, 7)))]
    #[case(Direction::Up, Position::new(4, 0), None)]
    #[case(Direction::Down, Position::new(4, 19), None)]
    #[case(Direction::Left, Position::new(0, 7), None)]
    #[case(Direction::Right, Position::new(19, 7), None)]
    #[case(Direction::Down, Position::new(19, 18), Some(Position::new(19, 19)))]
    #[case(Direction::Right, Position::new(18, 19), Some(Position::new(19, 19)))]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.advance(pos, BOUNDS), r);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert_eq!(d.reverse().reverse(), d);
    }
}
