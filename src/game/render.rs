use super::snake::Snake;
use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Clear, Widget},
};

/// Raster rendering of a snake and its food.  Every cell of the area is
/// cleared to the background first, so the widget can be drawn over whatever
/// was there on the previous frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BoardView<'a> {
    snake: &'a Snake,
    food: Position,
}

impl<'a> BoardView<'a> {
    pub(crate) fn new(snake: &'a Snake, food: Position) -> Self {
        BoardView { snake, food }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        buf.set_style(area, consts::BACKGROUND_STYLE);
        let mut canvas = Canvas { area, buf };
        for &pos in self.snake.segments() {
            canvas.fill_cell(pos, consts::SNAKE_STYLE);
        }
        canvas.fill_cell(self.food, consts::FOOD_STYLE);
    }
}

#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw a filled square for the grid cell at `pos`.  Only the first of
    /// the cell's terminal columns is painted; the remainder is the margin
    /// between neighboring squares.
    fn fill_cell(&mut self, pos: Position, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_COLUMNS)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(consts::SEGMENT_SYMBOL);
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_area() -> Rect {
        Rect::new(0, 0, 40, 20)
    }

    #[test]
    fn initial_board() {
        let snake = Snake::initial();
        let area = grid_area();
        let mut buffer = Buffer::empty(area);
        BoardView::new(&snake, consts::INITIAL_FOOD).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                ■ ■ ■                   ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                              ■         ",
            "                                        ",
            "                                        ",
            "                                        ",
            "                                        ",
        ]);
        expected.set_style(area, consts::BACKGROUND_STYLE);
        expected.set_style(Rect::new(16, 10, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(18, 10, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(20, 10, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(30, 15, 1, 1), consts::FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn food_on_snake_is_drawn_on_top() {
        let snake = Snake::new([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);
        let area = Rect::new(2, 1, 6, 3);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 5));
        BoardView::new(&snake, Position::new(1, 0)).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "          ",
            "  ■ ■     ",
            "    ■     ",
            "          ",
            "          ",
        ]);
        expected.set_style(area, consts::BACKGROUND_STYLE);
        expected.set_style(Rect::new(2, 1, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(4, 2, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(4, 1, 1, 1), consts::FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn cells_outside_area_are_skipped() {
        let snake = Snake::new([Position::new(3, 0), Position::new(0, 5)]);
        let area = Rect::new(0, 0, 4, 2);
        let mut buffer = Buffer::empty(area);
        BoardView::new(&snake, Position::new(1, 1)).render(area, &mut buffer);
        let mut expected = Buffer::with_lines(["    ", "  ■ "]);
        expected.set_style(area, consts::BACKGROUND_STYLE);
        expected.set_style(Rect::new(2, 1, 1, 1), consts::FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
