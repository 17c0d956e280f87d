//! Assorted constants & hard-coded configuration
use crate::game::grid::Cell;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default width of the playing field in cells
pub(crate) const GRID_WIDTH: i32 = 36;

/// Default height of the playing field in cells
pub(crate) const GRID_HEIGHT: i32 = 18;

/// `GRID_WIDTH * GRID_HEIGHT`
pub(crate) const GRID_AREA: usize = 648;

/// The cell in which the snake's head starts out at the beginning of a round
pub(crate) const SNAKE_START: Cell = Cell::new(10, 10);

/// Ticks per second at a score of zero
pub(crate) const BASE_TICKS_PER_SECOND: u64 = 10;

/// Time between movements of the snake in the demo behind the main menu
pub(crate) const DEMO_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The number of scores kept in the high score list
pub(crate) const HIGH_SCORE_SLOTS: usize = 5;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the cell in which the snake crashed
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "AUTOPILOT" marker in the score bar
pub(crate) const AUTOPILOT_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD.union(Modifier::REVERSED));

/// Style for the "NEW HIGH SCORE!" banner
pub(crate) const NEW_HIGH_SCORE_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
