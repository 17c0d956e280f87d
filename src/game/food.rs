use super::grid::{Cell, Grid};
use super::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;

/// The food that the snake is after
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: Cell,
}

impl Food {
    pub(crate) fn new(position: Cell) -> Food {
        Food { position }
    }

    pub(crate) fn position(self) -> Cell {
        self.position
    }

    /// Move the food to a cell of `grid` chosen uniformly at random from
    /// those not occupied by `snake`.  Returns `false`, leaving the food where
    /// it was, if the snake occupies every cell.
    pub(crate) fn relocate<R: Rng>(&mut self, grid: Grid, snake: &Snake, rng: &mut R) -> bool {
        let occupied = snake.segments().collect::<HashSet<_>>();
        match grid
            .cells()
            .filter(move |p| !occupied.contains(p))
            .choose(rng)
        {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}
