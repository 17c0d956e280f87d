use super::collision::CollisionRules;
use super::direction::Direction;
use super::food::Food;
use super::grid::{Cell, Grid};
use super::navigator::Navigator;
use super::snake::Snake;
use crate::options::PlayMode;
use rand::{rngs::ThreadRng, Rng};
use std::fmt;

/// One round of snake: the snake, its food, and the score, advanced one tick
/// at a time.
#[derive(Clone, Debug)]
pub(crate) struct Round<R = ThreadRng> {
    rng: R,
    grid: Grid,
    mode: PlayMode,
    rules: CollisionRules,
    snake: Snake,
    food: Food,
    score: u32,
    state: RoundState,
}

impl<R: Rng> Round<R> {
    pub(crate) fn new(grid: Grid, mode: PlayMode, rng: R) -> Round<R> {
        let start = grid.start_cell();
        let mut round = Round {
            rng,
            grid,
            mode,
            rules: CollisionRules::new(grid, mode.is_peaceful()),
            snake: Snake::new(start, Direction::Right),
            food: Food::new(start),
            score: 0,
            state: RoundState::Active,
        };
        round.restart();
        round
    }

    /// Start the round over with a fresh snake & food and a score of zero
    pub(crate) fn restart(&mut self) {
        let start = self.grid.start_cell();
        self.snake = Snake::new(start, Direction::Right);
        self.food = Food::new(start);
        self.score = 0;
        self.state = if self.food.relocate(self.grid, &self.snake, &mut self.rng) {
            RoundState::Active
        } else {
            RoundState::Terminated(Termination::BoardFull)
        };
    }

    /// Advance the round by one tick under manual control.  If `input` is
    /// `Some`, the snake turns that way first, unless doing so would reverse
    /// it.
    pub(crate) fn tick(&mut self, input: Option<Direction>) -> RoundState {
        if self.state.is_active() {
            if let Some(requested) = input {
                let heading = self.snake.heading().steer(requested);
                self.snake.turn(heading);
            }
        }
        self.step()
    }

    /// Advance the round by one tick, steering with the autopilot.  If the
    /// autopilot finds no way out, the snake keeps its current heading.
    pub(crate) fn tick_autopilot(&mut self) -> RoundState {
        if self.state.is_active() {
            if let Some(heading) = self.autopilot_heading() {
                self.snake.turn(heading);
            }
        }
        self.step()
    }

    fn step(&mut self) -> RoundState {
        if !self.state.is_active() {
            return self.state;
        }
        let head = self.snake.advance(self.grid, self.mode.is_peaceful());
        if self.rules.wall_collision(head) {
            self.state = RoundState::Terminated(Termination::Wall);
        } else if self.rules.self_collision(&self.snake) {
            self.state = RoundState::Terminated(Termination::SelfCollision);
        } else if CollisionRules::food_collision(head, self.food.position()) {
            self.snake.grow();
            self.score = self.score.saturating_add(1);
            if !self.food.relocate(self.grid, &self.snake, &mut self.rng) {
                self.state = RoundState::Terminated(Termination::BoardFull);
            }
        }
        self.state
    }
}

impl<R> Round<R> {
    /// The heading the autopilot would choose for the snake right now
    pub(crate) fn autopilot_heading(&self) -> Option<Direction> {
        Navigator::new(self.grid, &self.snake).next_heading(self.food.position())
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn state(&self) -> RoundState {
        self.state
    }

    pub(crate) fn mode(&self) -> PlayMode {
        self.mode
    }

    pub(crate) fn render_state(&self) -> RenderState {
        let crash = match self.state {
            RoundState::Terminated(Termination::Wall | Termination::SelfCollision) => {
                Some(self.grid.clamp(self.snake.head()))
            }
            _ => None,
        };
        RenderState {
            grid: self.grid,
            body: self.snake.segments().collect(),
            heading: self.snake.heading(),
            food: self.food.position(),
            crash,
            peaceful: self.mode.is_peaceful(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RoundState {
    Active,
    Terminated(Termination),
}

impl RoundState {
    pub(crate) fn is_active(self) -> bool {
        self == RoundState::Active
    }
}

/// Why a round ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Termination {
    Wall,
    SelfCollision,
    BoardFull,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Wall => write!(f, "hit the wall"),
            Termination::SelfCollision => write!(f, "ran into itself"),
            Termination::BoardFull => write!(f, "filled the board"),
        }
    }
}

/// A snapshot of a round for drawing
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RenderState {
    pub(crate) grid: Grid,

    /// The snake's cells, head first
    pub(crate) body: Vec<Cell>,

    pub(crate) heading: Direction,
    pub(crate) food: Cell,

    /// The on-grid cell at which the snake crashed, if it did
    pub(crate) crash: Option<Cell>,

    pub(crate) peaceful: bool,
}
