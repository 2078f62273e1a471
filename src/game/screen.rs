use super::render::BoardView;
use super::{Phase, SaveStatus, Session};
use crate::consts;
use crate::util::get_display_area;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
};

/// Outer size of the bordered board: two terminal columns per cell plus the
/// border
const BOARD_WIDTH: u16 = consts::GRID_SIZE * consts::CELL_COLUMNS + 2;
const BOARD_HEIGHT: u16 = consts::GRID_SIZE + 2;

impl<R> Widget for &Session<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [board_area] = Layout::horizontal([BOARD_WIDTH])
            .flex(Flex::Center)
            .areas(Rect {
                height: BOARD_HEIGHT.min(display.height),
                ..display
            });
        let block = Block::bordered()
            .title_top(Line::from(format!(" Score: {} ", self.board().score())))
            .title_top(Line::from(format!(" {} ", self.player())).right_aligned());
        let inner = block.inner(board_area);
        block.render(board_area, buf);
        let board = self.board();
        BoardView::new(board.snake(), board.food()).render(inner, buf);

        let footer = Rect {
            y: board_area.bottom(),
            height: display.bottom().saturating_sub(board_area.bottom()),
            ..display
        };
        Text::from(footer_lines(self))
            .centered()
            .render(footer, buf);
    }
}

fn footer_lines<R>(session: &Session<R>) -> Vec<Line<'static>> {
    match session.phase() {
        Phase::NotStarted => Vec::new(),
        Phase::Running => vec![Line::from_iter([
            Span::styled("← ↑ → ↓", consts::KEY_STYLE),
            Span::raw(": steer   "),
            Span::styled("Ctrl-C", consts::KEY_STYLE),
            Span::raw(": quit"),
        ])],
        Phase::GameOver => {
            let mut outcome = vec![Span::raw(format!(
                "Game over! Final score: {}",
                session.board().score()
            ))];
            let status = session.save_status();
            if status != SaveStatus::Idle {
                outcome.push(Span::raw("   "));
                outcome.push(Span::styled(status.to_string(), save_status_style(status)));
            }
            vec![
                Line::from(outcome),
                Line::from_iter([
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw("/"),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(": play again   "),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(": quit"),
                ]),
            ]
        }
    }
}

fn save_status_style(status: SaveStatus) -> Style {
    match status {
        SaveStatus::Success => consts::SAVED_STYLE,
        SaveStatus::Error => consts::SAVE_FAILED_STYLE,
        SaveStatus::Idle | SaveStatus::Pending => Style::new(),
    }
}
