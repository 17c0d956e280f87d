//! The autopilot.
//!
//! Every call works from scratch on a snapshot of the snake: nothing is
//! cached between ticks, so the same snake, grid, and food always produce the
//! same heading.
//!
//! The choice of heading goes through three stages:
//!
//! 1. Take the first step of a shortest path to the food, provided that the
//!    cell it leads to still has room for more than the snake's whole body.
//! 2. Otherwise, take the first step of a shortest path to the tail, which
//!    keeps the snake inside a region at least as big as itself.
//! 3. Otherwise, take the step into the largest open region, preferring
//!    earlier headings in [`Direction::ALL`] when regions are the same size.
//!
//! A cell is open if it is on the grid and not covered by the snake.  The
//! tail counts as covered even though it is about to move on, but a search
//! aimed at the tail may end on it.  When growth is pending the tail stays
//! put for a tick, so it is never a valid destination then.
use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::snake::Snake;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Navigator {
    grid: Grid,
    occupied: HashSet<Cell>,
    head: Cell,
    tail: Cell,
    length: usize,

    /// Whether the tail cell will be free after the next move
    tail_vacates: bool,
}

impl Navigator {
    pub(crate) fn new(grid: Grid, snake: &Snake) -> Navigator {
        let mut occupied = HashSet::with_capacity(snake.len());
        occupied.extend(snake.segments());
        Navigator {
            grid,
            occupied,
            head: snake.head(),
            tail: snake.tail(),
            length: snake.len(),
            tail_vacates: snake.len() > 1 && !snake.pending_growth,
        }
    }

    /// Choose the snake's next heading when the food is at `food`.  Returns
    /// `None` if every neighboring cell is blocked.
    pub(crate) fn next_heading(&self, food: Cell) -> Option<Direction> {
        if let Some(&first) = self.shortest_path(self.head, food).first() {
            if self.flood_fill(self.head.step(first)) > self.length {
                return Some(first);
            }
            log::trace!("Path to food at {food} is a trap; looking elsewhere");
        }
        if let Some(&first) = self.shortest_path(self.head, self.tail).first() {
            log::trace!("Following tail at {}", self.tail);
            return Some(first);
        }
        let heading = self.roomiest_heading();
        if heading.is_none() {
            log::trace!("No open cell next to head at {}", self.head);
        }
        heading
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.grid.in_bounds(cell) && !self.occupied.contains(&cell)
    }

    /// Breadth-first search for a shortest path of open cells from `start` to
    /// `goal`, returned as the headings to take.  `goal` may be the tail if
    /// the tail is about to move.  The result is empty if there is no such path or if `start`
    /// is `goal`.
    fn shortest_path(&self, start: Cell, goal: Cell) -> Vec<Direction> {
        let mut came_from = HashMap::<Cell, (Cell, Direction)>::with_capacity(self.grid.area());
        let mut visited = HashSet::with_capacity(self.grid.area());
        visited.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = Vec::new();
                let mut cell = current;
                while let Some(&(prev, dir)) = came_from.get(&cell) {
                    path.push(dir);
                    cell = prev;
                }
                path.reverse();
                return path;
            }
            for dir in Direction::ALL {
                let next = current.step(dir);
                let enterable = self.is_open(next)
                    || (next == goal && next == self.tail && self.tail_vacates);
                if enterable && visited.insert(next) {
                    came_from.insert(next, (current, dir));
                    queue.push_back(next);
                }
            }
        }
        Vec::new()
    }

    /// Count the open cells reachable from `start`, counting `start` itself
    fn flood_fill(&self, start: Cell) -> usize {
        let mut visited = HashSet::with_capacity(self.grid.area());
        visited.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for dir in Direction::ALL {
                let next = current.step(dir);
                if self.is_open(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited.len()
    }

    /// Return the heading into an open neighboring cell from which the most
    /// open cells are reachable.  Ties go to whichever heading comes first in
    /// [`Direction::ALL`].
    fn roomiest_heading(&self) -> Option<Direction> {
        let mut best: Option<(usize, Direction)> = None;
        for dir in Direction::ALL {
            let next = self.head.step(dir);
            if !self.is_open(next) {
                continue;
            }
            let room = self.flood_fill(next);
            if best.is_none_or(|(most, _)| room > most) {
                best = Some((room, dir));
            }
        }
        best.map(|(_, dir)| dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)], heading: Direction) -> Snake {
        let mut cells = cells.iter().map(|&(x, y)| Cell::new(x, y));
        let head = cells.next().unwrap();
        Snake {
            head,
            body: cells.collect(),
            heading,
            pending_growth: false,
        }
    }

    #[test]
    fn straight_to_food() {
        let grid = Grid::new(5, 5).unwrap();
        let nav = Navigator::new(grid, &snake(&[(2, 2)], Direction::Right));
        assert_eq!(
            nav.shortest_path(Cell::new(2, 2), Cell::new(4, 2)),
            [Direction::Right, Direction::Right]
        );
        assert!(nav.flood_fill(Cell::new(3, 2)) > 1);
        assert_eq!(nav.next_heading(Cell::new(4, 2)), Some(Direction::Right));
    }

    #[test]
    fn shortest_path_prefers_earlier_headings() {
        let grid = Grid::new(5, 5).unwrap();
        let nav = Navigator::new(grid, &snake(&[(2, 2)], Direction::Right));
        // Both Up-Left and Left-Up are shortest; Up is expanded first.
        assert_eq!(
            nav.shortest_path(Cell::new(2, 2), Cell::new(1, 1)),
            [Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn shortest_path_routes_around_body() {
        let grid = Grid::new(5, 5).unwrap();
        let s = snake(&[(1, 2), (2, 2), (2, 1), (2, 3)], Direction::Left);
        let nav = Navigator::new(grid, &s);
        let path = nav.shortest_path(Cell::new(1, 2), Cell::new(3, 2));
        assert_eq!(path.len(), 6);
        let mut cell = Cell::new(1, 2);
        for &dir in &path {
            cell = cell.step(dir);
            assert!(grid.in_bounds(cell));
        }
        assert_eq!(cell, Cell::new(3, 2));
    }

    #[test]
    fn no_path_to_self() {
        let grid = Grid::new(5, 5).unwrap();
        let nav = Navigator::new(grid, &snake(&[(2, 2)], Direction::Right));
        assert!(nav.shortest_path(Cell::new(2, 2), Cell::new(2, 2)).is_empty());
    }

    #[test]
    fn flood_fill_counts_open_region() {
        let grid = Grid::new(5, 5).unwrap();
        // A wall of body down column 2 splits the grid in two
        let s = snake(
            &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)],
            Direction::Up,
        );
        let nav = Navigator::new(grid, &s);
        assert_eq!(nav.flood_fill(Cell::new(0, 0)), 10);
        assert_eq!(nav.flood_fill(Cell::new(4, 4)), 10);
    }

    #[test]
    fn food_path_taken_when_roomy() {
        let grid = Grid::new(6, 1).unwrap();
        let nav = Navigator::new(grid, &snake(&[(3, 0), (4, 0)], Direction::Left));
        // Stepping to (2, 0) leaves three cells, more than the snake's two
        assert_eq!(nav.next_heading(Cell::new(1, 0)), Some(Direction::Left));
    }

    #[test]
    fn trap_avoided_by_following_tail() {
        let grid = Grid::new(5, 1).unwrap();
        let nav = Navigator::new(grid, &snake(&[(2, 0), (3, 0)], Direction::Left));
        // Stepping to (1, 0) leaves only two cells for a two-segment snake
        assert_eq!(nav.flood_fill(Cell::new(1, 0)), 2);
        assert_eq!(nav.next_heading(Cell::new(0, 0)), Some(Direction::Right));
    }

    #[test]
    fn growing_tail_is_not_followed() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = snake(
            &[(1, 1), (2, 1), (2, 0), (1, 0), (0, 0), (0, 1)],
            Direction::Left,
        );
        let nav = Navigator::new(grid, &s);
        assert_eq!(
            nav.shortest_path(Cell::new(1, 1), Cell::new(0, 1)),
            [Direction::Left]
        );
        s.grow();
        let nav = Navigator::new(grid, &s);
        assert!(nav.shortest_path(Cell::new(1, 1), Cell::new(0, 1)).is_empty());
        // The food at (2, 2) is a trap and the tail stays put, so the only
        // open neighbor is taken.
        assert_eq!(nav.next_heading(Cell::new(2, 2)), Some(Direction::Down));
    }

    #[test]
    fn falls_back_to_roomiest_heading() {
        let grid = Grid::new(4, 1).unwrap();
        let nav = Navigator::new(
            grid,
            &snake(&[(1, 0), (2, 0), (3, 0)], Direction::Left),
        );
        assert!(nav.shortest_path(Cell::new(1, 0), Cell::new(3, 0)).is_empty());
        assert_eq!(nav.next_heading(Cell::new(0, 0)), Some(Direction::Left));
    }

    #[test]
    fn roomiest_heading_picks_largest_region() {
        let grid = Grid::new(5, 3).unwrap();
        // Column 1 is blocked above and below the head, so Left leads into
        // a 3-cell pocket while Right leads into the 9 cells of columns 2-4
        let s = snake(&[(1, 1), (1, 0), (0, 0)], Direction::Down);
        let nav = Navigator {
            occupied: [Cell::new(1, 1), Cell::new(1, 0), Cell::new(1, 2)]
                .into_iter()
                .collect(),
            ..Navigator::new(grid, &s)
        };
        assert_eq!(nav.roomiest_heading(), Some(Direction::Right));
    }

    #[test]
    fn roomiest_heading_ties_go_to_first() {
        let grid = Grid::new(3, 3).unwrap();
        let nav = Navigator::new(grid, &snake(&[(1, 1)], Direction::Right));
        assert_eq!(nav.roomiest_heading(), Some(Direction::Up));
        let grid = Grid::new(3, 1).unwrap();
        let nav = Navigator::new(grid, &snake(&[(1, 0)], Direction::Right));
        assert_eq!(nav.roomiest_heading(), Some(Direction::Left));
    }

    #[test]
    fn boxed_in() {
        let grid = Grid::new(5, 5).unwrap();
        let s = snake(
            &[
                (1, 1),
                (1, 0),
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2),
                (2, 1),
                (2, 0),
            ],
            Direction::Up,
        );
        let nav = Navigator::new(grid, &s);
        assert_eq!(nav.next_heading(Cell::new(4, 4)), None);
    }

    #[test]
    fn deterministic() {
        let grid = Grid::default();
        let s = snake(
            &[(10, 10), (9, 10), (8, 10), (8, 11), (9, 11)],
            Direction::Right,
        );
        let food = Cell::new(3, 15);
        let first = Navigator::new(grid, &s).next_heading(food);
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(Navigator::new(grid, &s).next_heading(food), first);
        }
    }
}
