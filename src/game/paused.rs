use crate::command::Command;
use crate::consts;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// An action offered by the pause & game over pop-ups
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Choice {
    /// Unpause/resume the game
    Resume,

    /// Start the game over
    Restart,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl Choice {
    fn label(self) -> &'static str {
        match self {
            Choice::Resume => "Resume",
            Choice::Restart => "Restart",
            Choice::MainMenu => "Main Menu",
            Choice::Quit => "Quit",
        }
    }

    /// The key that selects this choice directly, as a command & as shown to
    /// the user
    fn shortcut(self) -> (Command, &'static str) {
        match self {
            Choice::Resume => (Command::Esc, "Esc"),
            Choice::Restart => (Command::R, "r"),
            Choice::MainMenu => (Command::M, "m"),
            Choice::Quit => (Command::Q, "q"),
        }
    }

    /// Render the choice as a `Line` for display in a pop-up.  If `selected`
    /// is `true`, this choice is the currently-selected/active one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        line.push_span(self.label());
        line.push_span(" (");
        line.push_span(Span::styled(self.shortcut().1, consts::KEY_STYLE));
        line.push_span(")");
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

/// A vertical list of [`Choice`]s with one of them selected
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct ChoiceList {
    choices: &'static [Choice],
    selected: usize,
}

impl ChoiceList {
    pub(super) fn new(choices: &'static [Choice]) -> ChoiceList {
        ChoiceList {
            choices,
            selected: 0,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.choices.len()
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<Choice> {
        let last = self.len().saturating_sub(1);
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Choice::Quit),
            Command::Enter => return self.choices.get(self.selected).copied(),
            Command::Up => self.selected = self.selected.saturating_sub(1),
            Command::Down => self.selected = (self.selected + 1).min(last),
            Command::Next => {
                self.selected = if self.selected < last {
                    self.selected + 1
                } else {
                    0
                };
            }
            Command::Prev => self.selected = self.selected.checked_sub(1).unwrap_or(last),
            Command::Home => self.selected = 0,
            Command::End => self.selected = last,
            cmd => {
                return self
                    .choices
                    .iter()
                    .copied()
                    .find(|choice| choice.shortcut().0 == cmd)
            }
        }
        None
    }
}

impl Widget for ChoiceList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for ((i, choice), row) in self.choices.iter().enumerate().zip(area.rows()) {
            choice.to_line(i == self.selected).render(row, buf);
        }
    }
}

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    choices: ChoiceList,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 19;

    const CHOICES: [Choice; 4] = [
        Choice::Resume,
        Choice::Restart,
        Choice::MainMenu,
        Choice::Quit,
    ];

    pub(super) fn new() -> Paused {
        Paused {
            choices: ChoiceList::new(&Self::CHOICES),
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<Choice> {
        self.choices.handle_event(event)
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (Esc)  │
     * │   Restart (r)   │
     * │   Main Menu (m) │
     * │   Quit (q)      │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        self.choices.render(inner, buf);
    }
}
