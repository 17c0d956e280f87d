use super::direction::Direction;
use super::grid::{Cell, Grid};
use std::collections::VecDeque;

/// A snake on the grid: its segments, heading, and any growth still owed
///
/// The head is stored apart from the rest of the body so that a snake always
/// has at least one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the cells behind the head, nearest first; the last
    /// element is the tail.
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake is currently facing
    pub(super) heading: Direction,

    /// Whether the next move should leave the tail in place
    pub(super) pending_growth: bool,
}

impl Snake {
    /// Create a one-segment snake at `head` facing in `heading`
    pub(crate) fn new(head: Cell, heading: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            heading,
            pending_growth: false,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    /// Return the position of the snake's last segment.  For a one-segment
    /// snake, this is the head.
    pub(crate) fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or(self.head)
    }

    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    /// The number of segments, head included
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over all segments, head first
    pub(crate) fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Does the head share a cell with any other segment?
    pub(crate) fn head_overlaps_body(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Change the snake's heading to `heading`.  No check against reversing is
    /// made here.
    pub(crate) fn turn(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Request one segment of growth on the next move.  Calling this again
    /// before the move has no further effect.
    pub(crate) fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Move the snake forwards one cell in its heading and return the new head
    /// position.  If `peaceful` is true, the new head is wrapped around the
    /// edges of `grid`; otherwise it may lie outside of it.
    ///
    /// The tail is dropped unless growth was pending, in which case the
    /// pending growth is consumed instead.
    pub(crate) fn advance(&mut self, grid: Grid, peaceful: bool) -> Cell {
        let mut pos = self.head.step(self.heading);
        if peaceful {
            pos = grid.wrap(pos);
        }
        self.body.push_front(self.head);
        self.head = pos;
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            let _ = self.body.pop_back();
        }
        pos
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
    fn advance_keeps_length() {
        let grid = Grid::new(10, 10).unwrap();
        let mut s = snake(&[(3, 3), (2, 3), (1, 3)], Direction::Right);
        assert_eq!(s.advance(grid, false), Cell::new(4, 3));
        assert_eq!(s.len(), 3);
        assert_eq!(
            s.segments().collect::<Vec<_>>(),
            [Cell::new(4, 3), Cell::new(3, 3), Cell::new(2, 3)]
        );
        assert_eq!(s.tail(), Cell::new(2, 3));
    }

    #[test]
    fn grow_once_adds_one_segment() {
        let grid = Grid::new(10, 10).unwrap();
        let mut s = snake(&[(3, 3), (2, 3)], Direction::Down);
        s.grow();
        assert_eq!(s.len(), 2);
        s.advance(grid, false);
        assert_eq!(s.len(), 3);
        assert_eq!(s.tail(), Cell::new(2, 3));
        s.advance(grid, false);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn grow_twice_adds_one_segment() {
        let grid = Grid::new(10, 10).unwrap();
        let mut s = Snake::new(Cell::new(5, 5), Direction::Up);
        s.grow();
        s.grow();
        s.advance(grid, false);
        assert_eq!(s.len(), 2);
        s.advance(grid, false);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn advance_off_edge() {
        let grid = Grid::new(4, 4).unwrap();
        let mut s = Snake::new(Cell::new(0, 2), Direction::Left);
        assert_eq!(s.advance(grid, false), Cell::new(-1, 2));
        let mut s = Snake::new(Cell::new(0, 2), Direction::Left);
        assert_eq!(s.advance(grid, true), Cell::new(3, 2));
        let mut s = Snake::new(Cell::new(1, 3), Direction::Down);
        assert_eq!(s.advance(grid, true), Cell::new(1, 0));
    }

    #[test]
    fn one_segment_tail_is_head() {
        let s = Snake::new(Cell::new(10, 10), Direction::Right);
        assert_eq!(s.tail(), s.head());
        assert_eq!(s.len(), 1);
        assert!(!s.head_overlaps_body());
    }

    #[test]
    fn overlap_after_loop() {
        let grid = Grid::new(10, 10).unwrap();
        let mut s = snake(
            &[(2, 2), (2, 3), (3, 3), (3, 2), (3, 1)],
            Direction::Right,
        );
        s.advance(grid, false);
        assert!(s.head_overlaps_body());
    }

    #[test]
    fn chasing_tail_is_not_overlap() {
        let grid = Grid::new(10, 10).unwrap();
        let mut s = snake(&[(2, 2), (2, 3), (3, 3), (3, 2)], Direction::Right);
        s.advance(grid, false);
        assert_eq!(s.head(), Cell::new(3, 2));
        assert!(!s.head_overlaps_body());
    }
}
