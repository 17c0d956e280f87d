use crate::config::Config;
use crate::consts;
use crate::game::grid::Grid;
use crate::highscores::HighScores;
use crate::options::Options;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::error::Error;
use std::fmt::Write;

/// State carried from screen to screen for the life of the program
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) grid: Grid,
    pub(crate) options: Options,
    pub(crate) high_scores: HighScores,
}

impl Globals {
    /// Offer a final score to the high score list and, if it got on the list,
    /// write the list out.  Returns `true` if the score is a new high score.
    /// Failure to save is logged and otherwise ignored.
    pub(crate) fn record_score(&mut self, score: u32) -> bool {
        if !self.high_scores.add_score(score) {
            return false;
        }
        log::info!("New high score: {score}");
        if let Err(e) = self.config.save_high_scores(&self.high_scores) {
            log::warn!("{}", error_chain(&e));
        }
        true
    }

    /// `Globals` that never touch the filesystem
    #[cfg(test)]
    pub(crate) fn offline() -> Globals {
        let mut globals = Globals::default();
        globals.config.files.save_high_scores = false;
        globals
    }
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [centered] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(centered);
    centered
}

/// The text of each row of a buffer, for comparing renders while ignoring
/// styles
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect()
        })
        .collect()
}

/// Render an error and its chain of sources on a single line
pub(crate) fn error_chain(e: &dyn Error) -> String {
    let mut s = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        let _ = write!(s, ": {src}");
        source = src.source();
    }
    s
}

/// Iteration & stepping over the variants of a fieldless enum
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Shape {
        Circle,
        Square,
        Triangle,
    }

    #[test]
    fn enum_ext() {
        assert_eq!(
            Shape::iter().collect::<Vec<_>>(),
            [Shape::Circle, Shape::Square, Shape::Triangle]
        );
        assert_eq!(Shape::min(), Shape::Circle);
        assert_eq!(Shape::max(), Shape::Triangle);
        assert_eq!(Shape::Circle.next(), Some(Shape::Square));
        assert_eq!(Shape::Triangle.next(), None);
        assert_eq!(Shape::Square.prev(), Some(Shape::Circle));
        assert_eq!(Shape::Circle.prev(), None);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(20, 6), Rect::new(30, 9, 20, 6))]
    #[case(Rect::new(0, 0, 100, 30), Size::new(80, 24), Rect::new(10, 3, 80, 24))]
    #[case(Rect::new(5, 5, 10, 4), Size::new(20, 6), Rect::new(5, 5, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[test]
    fn error_chain_joins_sources() {
        let tmpdir = tempfile::tempdir().unwrap();
        // Reading a directory as a file fails
        let e = HighScores::load(tmpdir.path()).unwrap_err();
        let chain = error_chain(&e);
        assert!(
            chain.starts_with(
                "Failed to read high scores from disk: failed to read high scores file: "
            ),
            "{chain}"
        );
    }

    #[test]
    fn record_score() {
        let mut globals = Globals::offline();
        assert!(!globals.record_score(0));
        assert!(globals.record_score(8));
        assert_eq!(globals.high_scores.scores(), [8, 0, 0, 0, 0]);
    }

    #[test]
    fn record_score_saves() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("high-scores.json");
        let mut globals = Globals::default();
        globals.config.files.high_scores_file = Some(path.clone());
        assert!(globals.record_score(15));
        assert_eq!(
            HighScores::load(&path).unwrap().scores(),
            [15, 0, 0, 0, 0]
        );
    }
}
