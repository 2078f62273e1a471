use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// The extent of the playing field, in grid cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    /// The fixed square grid every game is played on
    pub(crate) const GRID: Bounds = Bounds {
        width: consts::GRID_SIZE,
        height: consts::GRID_SIZE,
    };

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Pick a cell uniformly at random.  Nothing about the cell's current
    /// occupant is taken into account.
    pub(crate) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(0..self.width),
            y: rng.random_range(0..self.height),
        }
    }
}
