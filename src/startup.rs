use crate::command::Command;
use crate::consts;
use crate::logo::Logo;
use crate::util::get_display_area;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The name entry screen shown before each game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StartupScreen {
    name: String,
    /// Set when the player tried to start with a blank name; cleared by the
    /// next edit
    rejected: bool,
}

impl StartupScreen {
    const PROMPT_ROW: u16 = 8;
    const FIELD_ROW: u16 = 10;
    const HINT_ROW: u16 = 12;
    const INSTRUCTIONS_ROW: u16 = 14;
    const FIELD_WIDTH: u16 = 30;

    pub(crate) fn new(name: &str) -> StartupScreen {
        StartupScreen {
            name: String::from(name),
            rejected: false,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Show the "name required" hint until the name is next edited
    pub(crate) fn reject(&mut self) {
        self.rejected = true;
    }

    pub(crate) fn handle_key(&mut self, ev: KeyEvent) -> Option<StartupAction> {
        match Command::from_key_event(ev) {
            Some(Command::Quit) => return Some(StartupAction::Quit),
            Some(Command::Enter) => return Some(StartupAction::Start),
            _ => (),
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Backspace => {
                if let Some((i, _)) = self.name.grapheme_indices(true).next_back() {
                    self.name.truncate(i);
                }
            }
            KeyCode::Char(c) => self.name.push(c),
            _ => return None,
        }
        self.rejected = false;
        None
    }

    /// Where the terminal cursor belongs when the screen is drawn in `area`
    pub(crate) fn cursor_position(&self, area: Rect) -> Position {
        let field = Self::field_area(area);
        let shown = visible_tail(&self.name, usize::from(field.width.saturating_sub(1)));
        let offset = u16::try_from(shown.width()).unwrap_or(u16::MAX);
        Position::new(field.x.saturating_add(offset), field.y)
    }

    fn field_area(area: Rect) -> Rect {
        let display = get_display_area(area);
        let [field] = Layout::horizontal([Self::FIELD_WIDTH])
            .flex(Flex::Center)
            .areas(row(display, Self::FIELD_ROW));
        field
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StartupAction {
    Start,
    Quit,
}

static INSTRUCTIONS: &[&str] = &[
    "Steer the snake with ← ↑ → ↓",
    "Eat the food, and keep clear of the walls and your own tail!",
];

impl Widget for &StartupScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(Rect {
                height: Logo::HEIGHT,
                ..row(display, 1)
            });
        Logo.render(logo_area.intersection(display), buf);

        Line::from("Enter your name:")
            .centered()
            .render(row(display, StartupScreen::PROMPT_ROW), buf);

        let field = StartupScreen::field_area(area);
        buf.set_style(field, consts::INPUT_STYLE);
        Span::raw(visible_tail(
            &self.name,
            usize::from(field.width.saturating_sub(1)),
        ))
        .render(field, buf);

        if self.rejected {
            Line::styled("Please enter a name before starting", consts::HINT_STYLE)
                .centered()
                .render(row(display, StartupScreen::HINT_ROW), buf);
        }

        Text::from_iter(INSTRUCTIONS.iter().copied())
            .centered()
            .render(
                Rect {
                    height: 2,
                    ..row(display, StartupScreen::INSTRUCTIONS_ROW)
                }
                .intersection(display),
                buf,
            );

        Line::from_iter([
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(": start   "),
            Span::styled("Ctrl-C", consts::KEY_STYLE),
            Span::raw(": quit"),
        ])
        .centered()
        .render(row(display, display.height.saturating_sub(1)), buf);
    }
}

/// The one-line strip `offset` rows down from the top of `display`, or an
/// empty rectangle if `display` is not that tall
fn row(display: Rect, offset: u16) -> Rect {
    Rect {
        y: display.y.saturating_add(offset),
        height: 1,
        ..display
    }
    .intersection(display)
}

/// Return the longest suffix of `text` that is at most `max_width` columns
/// wide without splitting a grapheme cluster
fn visible_tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (i, g) in text.grapheme_indices(true).rev() {
        width += g.width();
        if width > max_width {
            break;
        }
        start = i;
    }
    &text[start..]
}
