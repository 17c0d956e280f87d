use super::direction::Direction;
use crate::consts;
use std::fmt;
use thiserror::Error;

/// A cell of the playing field, identified by column `x` and row `y` counted
/// from the top-left corner.
///
/// Coordinates are signed so that a step off the edge of the grid is
/// representable; such cells are either fatal (classic mode) or folded back
/// onto the grid with [`Grid::wrap()`] (peaceful mode).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell one step away in direction `dir`
    pub(crate) fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed-size lattice that a round is played on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
    area: usize,
}

impl Grid {
    /// Create a `width` × `height` grid.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either dimension is not positive or if the grid has
    /// fewer than two cells, which would leave no room for both the snake and
    /// its food.
    pub(crate) fn new(width: i32, height: i32) -> Result<Grid, GridError> {
        if width <= 0 {
            return Err(GridError::Width(width));
        }
        if height <= 0 {
            return Err(GridError::Height(height));
        }
        let area = usize::try_from(i64::from(width) * i64::from(height))
            .map_err(|_| GridError::TooLarge { width, height })?;
        if area < 2 {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(Grid {
            width,
            height,
            area,
        })
    }

    pub(crate) fn width(self) -> i32 {
        self.width
    }

    pub(crate) fn height(self) -> i32 {
        self.height
    }

    /// The number of cells in the grid
    pub(crate) fn area(self) -> usize {
        self.area
    }

    /// Is `cell` inside the grid?
    pub(crate) fn in_bounds(self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Fold `cell` back onto the grid as though the grid were a torus.
    /// Cells already on the grid are returned unchanged.
    pub(crate) fn wrap(self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.width),
            y: cell.y.rem_euclid(self.height),
        }
    }

    /// Return the in-bounds cell nearest to `cell`
    pub(crate) fn clamp(self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.clamp(0, self.width - 1),
            y: cell.y.clamp(0, self.height - 1),
        }
    }

    /// The cell in which a new snake starts out: the fixed
    /// [`SNAKE_START`][consts::SNAKE_START] cell if the grid contains it, the
    /// center of the grid otherwise.
    pub(crate) fn start_cell(self) -> Cell {
        if self.in_bounds(consts::SNAKE_START) {
            consts::SNAKE_START
        } else {
            Cell::new(self.width / 2, self.height / 2)
        }
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid {
            width: consts::GRID_WIDTH,
            height: consts::GRID_HEIGHT,
            area: consts::GRID_AREA,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid width must be positive; got {0}")]
    Width(i32),
    #[error("grid height must be positive; got {0}")]
    Height(i32),
    #[error("a {width}x{height} grid has no room for both the snake and its food")]
    TooSmall { width: i32, height: i32 },
    #[error("a {width}x{height} grid has too many cells")]
    TooLarge { width: i32, height: i32 },
}
