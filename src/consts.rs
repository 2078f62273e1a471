//! Assorted constants & hard-coded configuration
use crate::game::Direction;
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// How often to check on an in-flight score submission while no game is
/// running
pub(crate) const SAVE_POLL_PERIOD: Duration = Duration::from_millis(50);

/// Width & height of the logical drawing surface
pub(crate) const CANVAS_SIZE: u16 = 400;

/// Width & height of a single grid cell on the logical drawing surface
pub(crate) const CELL_SIZE: u16 = 20;

/// Number of cells along each side of the (square) grid
pub(crate) const GRID_SIZE: u16 = CANVAS_SIZE / CELL_SIZE;

/// Number of terminal columns used to draw one grid cell.  The glyph goes in
/// the first column; the rest are left blank as the inset margin.
pub(crate) const CELL_COLUMNS: u16 = 2;

/// The snake at the start of every game, head first
pub(crate) const INITIAL_SNAKE: [Position; 3] = [
    Position { x: 10, y: 10 },
    Position { x: 9, y: 10 },
    Position { x: 8, y: 10 },
];

/// The direction the snake faces at the start of every game
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Right;

/// Where the food sits before the first one is eaten
pub(crate) const INITIAL_FOOD: Position = Position { x: 15, y: 15 };

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for snake segments & food
pub(crate) const SEGMENT_SYMBOL: char = '■';

/// Style for the cleared board
pub(crate) const BACKGROUND_STYLE: Style = Style::new().bg(Color::Black);

/// Style for the snake's segments
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Rgb(0x00, 0xFF, 0x00));

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::Rgb(0xFF, 0x00, 0x00));

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the name entry field
pub(crate) const INPUT_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for complaints about the entered name
pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the save status once the server has accepted the score
pub(crate) const SAVED_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the save status when the score could not be saved
pub(crate) const SAVE_FAILED_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Path of the score ingest endpoint
pub(crate) const SCORE_ENDPOINT: &str = "/api/score";

/// Message sent to clients whenever a score could not be saved
pub(crate) const SAVE_FAILED_MESSAGE: &str = "Failed to save score";

/// Address the score server listens on when none is configured
pub(crate) const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Score server the client talks to when none is configured
pub(crate) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default size of the database connection pool
pub(crate) const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Log filter used when `RUST_LOG` is not set
pub(crate) const DEFAULT_LOG_FILTER: &str = "snake_scores=info,tower_http=info";

/// Environment variable that overrides the configured database URL
pub(crate) const DATABASE_URL_VAR: &str = "DATABASE_URL";
