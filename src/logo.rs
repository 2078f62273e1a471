use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Span, Text},
    widgets::Widget,
};

/// Title art for the name entry screen: the word "Snake" followed by a
/// morsel of food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Logo;

impl Logo {
    const SNAKE_WIDTH: u16 = 28;
    const FOOD_GAP: u16 = 1;
    pub(crate) const HEIGHT: u16 = 5;
    pub(crate) const WIDTH: u16 = Self::SNAKE_WIDTH + Self::FOOD_GAP + 1;
}

#[rustfmt::skip]
static SNAKE: &[&str] = &[
     " ____              _        ",
     "/ ___| _ __   __ _| | _____ ",
    r"\___ \| '_ \ / _` | |/ / _ \",
     " ___) | | | | (_| |   <  __/",
    r"|____/|_| |_|\__,_|_|\_\___|",
];

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snake_area = Rect {
            width: Self::SNAKE_WIDTH,
            height: Self::HEIGHT,
            ..area
        }
        .intersection(area);
        Text::from_iter(SNAKE.iter().copied())
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
        let food_area = Rect::new(
            area.x.saturating_add(Self::SNAKE_WIDTH + Self::FOOD_GAP),
            area.y.saturating_add(Self::HEIGHT - 1),
            1,
            1,
        )
        .intersection(area);
        if !food_area.is_empty() {
            Span::styled(String::from(consts::SEGMENT_SYMBOL), consts::FOOD_STYLE)
                .render(food_area, buf);
        }
    }
}
