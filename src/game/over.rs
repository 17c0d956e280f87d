use super::paused::{Choice, ChoiceList};
use super::round::Termination;
use crate::consts;
use crate::highscores::HighScores;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for the pop-up shown once a round has ended
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Over {
    score: u32,
    reason: Termination,
    new_high_score: bool,
    high_scores: HighScores,
    choices: ChoiceList,
}

impl Over {
    /// The height that should be used for the `Rect` passed to
    /// `Over::render()`
    pub(super) const HEIGHT: u16 = 16;

    /// The width that should be used for the `Rect` passed to
    /// `Over::render()`
    pub(super) const WIDTH: u16 = 30;

    const CHOICES: [Choice; 3] = [Choice::Restart, Choice::MainMenu, Choice::Quit];

    pub(super) fn new(
        score: u32,
        reason: Termination,
        new_high_score: bool,
        high_scores: HighScores,
    ) -> Over {
        Over {
            score,
            reason,
            new_high_score,
            high_scores,
            choices: ChoiceList::new(&Self::CHOICES),
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<Choice> {
        self.choices.handle_event(event)
    }
}

impl Widget for &Over {
    /*
     * ┌──────── GAME OVER! ────────┐
     * │ The snake hit the wall     │
     * │      NEW HIGH SCORE!       │
     * │ Score: 12                  │
     * │                            │
     * │ High Scores:               │
     * │   1.    12                 │
     * │   2.     7                 │
     * │   3.     0                 │
     * │   4.     0                 │
     * │   5.     0                 │
     * │                            │
     * │ » Restart (r)              │
     * │   Main Menu (m)            │
     * │   Quit (q)                 │
     * └────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" GAME OVER! ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let [reason_area, banner_area, score_area, _, heading_area, list_area, _, choices_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
        Line::from(format!("The snake {}", self.reason)).render(reason_area, buf);
        if self.new_high_score {
            Line::styled("NEW HIGH SCORE!", consts::NEW_HIGH_SCORE_STYLE)
                .centered()
                .render(banner_area, buf);
        }
        Line::from(format!("Score: {}", self.score)).render(score_area, buf);
        Line::from("High Scores:").render(heading_area, buf);
        // Only the first entry equal to the new score is the player's own
        let mut highlight = self.new_high_score;
        for ((rank, &score), row) in (1..).zip(self.high_scores.scores()).zip(list_area.rows()) {
            let style = if highlight && score == self.score {
                highlight = false;
                consts::NEW_HIGH_SCORE_STYLE
            } else {
                Style::new()
            };
            Line::styled(format!("{rank:>3}. {score:>5}"), style).render(row, buf);
        }
        self.choices.render(choices_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::buffer_lines;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn high_scores(scores: &[u32]) -> HighScores {
        let mut hs = HighScores::default();
        for &s in scores {
            hs.add_score(s);
        }
        hs
    }

    #[test]
    fn render_new_high_score() {
        let area = Rect::new(0, 0, Over::WIDTH, Over::HEIGHT);
        let mut buffer = Buffer::empty(area);
        let over = Over::new(
            12,
            Termination::SelfCollision,
            true,
            high_scores(&[20, 12, 5]),
        );
        over.render(area, &mut buffer);
        assert_eq!(
            buffer_lines(&buffer),
            [
                "┌──────── GAME OVER! ────────┐",
                "│ The snake ran into itself  │",
                "│      NEW HIGH SCORE!       │",
                "│ Score: 12                  │",
                "│                            │",
                "│ High Scores:               │",
                "│   1.    20                 │",
                "│   2.    12                 │",
                "│   3.     5                 │",
                "│   4.     0                 │",
                "│   5.     0                 │",
                "│                            │",
                "│ » Restart (r)              │",
                "│   Main Menu (m)            │",
                "│   Quit (q)                 │",
                "└────────────────────────────┘",
            ]
        );
        assert_eq!(buffer[(8, 2)].fg, consts::NEW_HIGH_SCORE_STYLE.fg.unwrap());
        assert_eq!(buffer[(6, 7)].fg, consts::NEW_HIGH_SCORE_STYLE.fg.unwrap());
        assert_ne!(buffer[(6, 6)].fg, consts::NEW_HIGH_SCORE_STYLE.fg.unwrap());
    }

    #[test]
    fn render_ordinary_score() {
        let area = Rect::new(0, 0, Over::WIDTH, Over::HEIGHT);
        let mut buffer = Buffer::empty(area);
        let over = Over::new(0, Termination::Wall, false, HighScores::default());
        over.render(area, &mut buffer);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[1], "│ The snake hit the wall     │");
        assert_eq!(lines[2], "│                            │");
        assert_eq!(lines[3], "│ Score: 0                   │");
        assert_eq!(lines[6], "│   1.     0                 │");
    }

    #[test]
    fn choices() {
        let mut over = Over::new(3, Termination::Wall, false, HighScores::default());
        assert_eq!(over.handle_event(Event::Key(KeyCode::Esc.into())), None);
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(Choice::MainMenu)
        );
        assert_eq!(over.handle_event(Event::Key(KeyCode::End.into())), None);
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(Choice::Quit)
        );
    }
}
