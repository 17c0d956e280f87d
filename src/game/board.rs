use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::round::RenderState;
use crate::consts;
use crate::theme::{Palette, Theme};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect, Size},
    style::{Modifier, Style},
    widgets::{Block, Widget},
};

/// A widget drawing the playing field of a round, centered in the area it is
/// rendered to.  Each cell of the grid is two columns wide so that the field
/// looks roughly square.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    state: RenderState,
    palette: Palette,
}

impl Board {
    pub(crate) fn new(state: RenderState, theme: Theme) -> Board {
        Board {
            state,
            palette: theme.palette(),
        }
    }

    /// The size of the widget, border included, for a given grid
    pub(crate) fn size(grid: Grid) -> Size {
        let width = u16::try_from(grid.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(grid.height()).unwrap_or(u16::MAX);
        Size {
            width: width.saturating_mul(2).saturating_add(3),
            height: height.saturating_add(2),
        }
    }
}

impl Widget for Board {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = center_rect(area, Board::size(self.state.grid));
        let background = self.palette.background;
        buf.set_style(area, Style::new().bg(background));
        let border_style = Style::new().fg(self.palette.border);
        if self.state.peaceful {
            DottedBorder {
                style: border_style,
            }
            .render(area, buf);
        } else {
            Block::bordered()
                .border_style(border_style)
                .render(area, buf);
        }

        let mut canvas = Canvas {
            area: area.inner(Margin::new(1, 1)),
            background: Style::new().bg(background),
            buf,
        };
        canvas.draw_cell(
            self.state.food,
            consts::FOOD_SYMBOL,
            Style::new().fg(self.palette.food),
        );
        let len = self.state.body.len();
        // Tail first so that the head ends up on top of anything it overlaps
        for (i, &cell) in self.state.body.iter().enumerate().rev() {
            let symbol = if i == 0 {
                head_symbol(self.state.heading)
            } else {
                consts::SNAKE_BODY_SYMBOL
            };
            let style = Style::new()
                .fg(self.palette.segment_color(i, len))
                .add_modifier(Modifier::BOLD);
            canvas.draw_cell(cell, symbol, style);
        }
        if let Some(crash) = self.state.crash {
            canvas.draw_cell(crash, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }
    }
}

fn head_symbol(heading: Direction) -> char {
    match heading {
        Direction::Up => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_WEST_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_EAST_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    background: Style,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn position(&self, cell: Cell) -> Option<(u16, u16)> {
        let x = u16::try_from(cell.x)
            .ok()?
            .checked_mul(2)?
            .checked_add(1)?
            .checked_add(self.area.x)?;
        let y = u16::try_from(cell.y).ok()?.checked_add(self.area.y)?;
        (x < self.area.right() && y < self.area.bottom()).then_some((x, y))
    }

    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(pos) = self.position(cell) else {
            return;
        };
        let style = Style::reset().patch(self.background).patch(style);
        if let Some(c) = self.buf.cell_mut(pos) {
            c.set_char(symbol);
            c.set_style(style);
        }
    }
}

/// A border drawn with dots, marking walls that the snake passes through
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder {
    style: Style,
}

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut put = |x: u16, y: u16, symbol: char| {
            if let Some(c) = buf.cell_mut((x, y)) {
                c.set_char(symbol);
                c.set_style(self.style);
            }
        };
        let (left, right) = (area.left(), area.right().saturating_sub(1));
        let (top, bottom) = (area.top(), area.bottom().saturating_sub(1));
        for x in left..=right {
            put(x, top, '⋯');
            put(x, bottom, '⋯');
        }
        for y in top..=bottom {
            put(left, y, '⋮');
            put(right, y, '⋮');
        }
        put(left, top, '·');
        put(right, top, '·');
        put(left, bottom, '·');
        put(right, bottom, '·');
    }
}
