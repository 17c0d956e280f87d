use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Collision predicates for one round.  In peaceful mode the grid wraps
/// around and the snake may pass through itself, so neither wall nor self
/// collisions are ever reported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CollisionRules {
    grid: Grid,
    peaceful: bool,
}

impl CollisionRules {
    pub(crate) fn new(grid: Grid, peaceful: bool) -> CollisionRules {
        CollisionRules { grid, peaceful }
    }

    pub(crate) fn wall_collision(self, head: Cell) -> bool {
        !self.peaceful && !self.grid.in_bounds(head)
    }

    pub(crate) fn self_collision(self, snake: &Snake) -> bool {
        !self.peaceful && snake.head_overlaps_body()
    }

    pub(crate) fn food_collision(head: Cell, food: Cell) -> bool {
        head == food
    }
}
