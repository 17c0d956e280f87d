use super::board::Board;
use super::grid::Grid;
use super::round::{Round, RoundState};
use crate::options::PlayMode;
use crate::theme::Theme;
use rand::Rng;

/// A classic-mode round played by the autopilot forever, starting over
/// whenever it ends
#[derive(Clone, Debug)]
pub(crate) struct Demo<R> {
    round: Round<R>,
}

impl<R: Rng> Demo<R> {
    pub(crate) fn new_with_rng(grid: Grid, rng: R) -> Demo<R> {
        Demo {
            round: Round::new(grid, PlayMode::Classic, rng),
        }
    }

    pub(crate) fn advance(&mut self) {
        if let RoundState::Terminated(reason) = self.round.tick_autopilot() {
            log::debug!(
                "Demo snake {reason} with a score of {}; restarting",
                self.round.score()
            );
            self.round.restart();
        }
    }
}

impl<R> Demo<R> {
    pub(crate) fn board(&self, theme: Theme) -> Board {
        Board::new(self.round.render_state(), theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn keeps_running() {
        let grid = Grid::new(6, 4).unwrap();
        let mut demo = Demo::new_with_rng(grid, ChaCha12Rng::seed_from_u64(RNG_SEED));
        for _ in 0..500 {
            demo.advance();
            assert!(demo.round.state().is_active());
            let rs = demo.round.render_state();
            assert!(rs.body.iter().all(|&c| grid.in_bounds(c)));
            assert!(!rs.body.contains(&rs.food));
        }
    }

    #[test]
    fn restarts_when_board_fills() {
        // On a 2×1 grid, the snake fills the board after eating twice.
        let grid = Grid::new(2, 1).unwrap();
        let mut demo = Demo::new_with_rng(grid, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let mut scores = Vec::new();
        for _ in 0..6 {
            demo.advance();
            assert!(demo.round.state().is_active());
            scores.push(demo.round.score());
        }
        assert_eq!(scores, [1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn board_uses_theme() {
        let grid = Grid::default();
        let demo = Demo::new_with_rng(grid, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(
            demo.board(Theme::Nokia),
            Board::new(demo.round.render_state(), Theme::Nokia)
        );
    }
}
