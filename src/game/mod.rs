mod board;
mod collision;
mod demo;
mod direction;
mod food;
pub(crate) mod grid;
mod navigator;
mod over;
mod paused;
mod round;
mod snake;
pub(crate) use self::demo::Demo;
use self::board::Board;
use self::direction::Direction;
use self::over::Over;
use self::paused::{Choice, Paused};
use self::round::{Round, RoundState};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Size},
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::io;
use std::time::Instant;

/// The playing screen
#[derive(Clone, Debug)]
pub(crate) struct Game<R = ThreadRng> {
    round: Round<R>,
    globals: Globals,

    /// Whether the snake is currently being steered by the autopilot
    autopilot: bool,

    /// The direction most recently requested by the player since the last
    /// tick
    pending_turn: Option<Direction>,

    state: GameState,
    next_tick: Option<Instant>,
}

impl Game<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let options = globals.options;
        log::info!(
            "Starting {} game on a {}×{} grid at {} difficulty{}",
            options.mode,
            globals.grid.width(),
            globals.grid.height(),
            options.difficulty,
            if options.autopilot {
                " with autopilot"
            } else {
                ""
            }
        );
        Game {
            round: Round::new(globals.grid, options.mode, rng),
            autopilot: options.autopilot,
            globals,
            pending_turn: None,
            state: GameState::Running,
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.running() {
            if self.next_tick.is_none() {
                let period = self
                    .globals
                    .options
                    .difficulty
                    .tick_period(self.round.score());
                self.next_tick = Some(Instant::now() + period);
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        let state = if self.autopilot {
            self.pending_turn = None;
            self.round.tick_autopilot()
        } else {
            self.round.tick(self.pending_turn.take())
        };
        if let RoundState::Terminated(reason) = state {
            let score = self.round.score();
            log::info!("Game over: the snake {reason} with a score of {score}");
            let new_high_score = self.globals.record_score(score);
            self.state = GameState::Over(Over::new(
                score,
                reason,
                new_high_score,
                self.globals.high_scores.clone(),
            ));
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let choice = match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.steer(Direction::Up),
                        Command::Down => self.steer(Direction::Down),
                        Command::Left => self.steer(Direction::Left),
                        Command::Right => self.steer(Direction::Right),
                        Command::Autopilot => self.toggle_autopilot(),
                        Command::Esc => self.pause(),
                        _ => (),
                    }
                }
                return None;
            }
            GameState::Paused(ref mut paused) => paused.handle_event(event)?,
            GameState::Over(ref mut over) => over.handle_event(event)?,
        };
        match choice {
            Choice::Resume => self.state = GameState::Running,
            Choice::Restart => self.restart(),
            Choice::MainMenu => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
            Choice::Quit => return Some(Screen::Quit),
        }
        None
    }

    fn restart(&mut self) {
        log::info!("Restarting game");
        self.round.restart();
        self.pending_turn = None;
        self.state = GameState::Running;
        self.next_tick = None;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    /// Buffer a turn to apply at the next tick.  Later requests replace
    /// earlier ones, and nothing is buffered while the autopilot is driving.
    fn steer(&mut self, direction: Direction) {
        if !self.autopilot {
            self.pending_turn = Some(direction);
        }
    }

    fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        self.pending_turn = None;
        log::debug!(
            "Autopilot {}",
            if self.autopilot {
                "engaged"
            } else {
                "disengaged"
            }
        );
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let score = self.round.score();
        let mut score_line = Line::styled(format!(" Score: {score}"), consts::SCORE_BAR_STYLE);
        if self.autopilot {
            score_line.push_span("  ");
            score_line.push_span(Span::styled(" AUTOPILOT ", consts::AUTOPILOT_STYLE));
        }
        score_line.render(score_area, buf);
        Line::from(format!(
            "Speed: +{}% ",
            self.globals.options.difficulty.speed_percent(score)
        ))
        .right_aligned()
        .render(score_area, buf);

        Board::new(self.round.render_state(), self.globals.options.theme).render(board_area, buf);

        match self.state {
            GameState::Running => {
                Line::from_iter([
                    Span::raw(" Pause ("),
                    Span::styled("Esc", consts::KEY_STYLE),
                    Span::raw(") — Autopilot ("),
                    Span::styled("o", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(hint_area, buf);
            }
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over(ref over) => {
                let over_area = center_rect(
                    display,
                    Size {
                        width: Over::WIDTH,
                        height: Over::HEIGHT,
                    },
                );
                over.render(over_area, buf);
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Over(Over),
}
