use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// How to play, shown at the top of the main menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 26;

    fn keys(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
        let mut line = Line::from(prefix);
        for (i, k) in keys.into_iter().enumerate() {
            if i > 0 {
                line.push_span(" ");
            }
            line.push_span(Span::styled(k, consts::KEY_STYLE));
        }
        line
    }
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Steer the snake with:"),
            Self::keys("       ", ["←", "↓", "↑", "→"]),
            Self::keys("   or: ", ["h", "j", "k", "l"]),
            Self::keys("   or: ", ["a", "s", "w", "d"]),
            Line::from("Eat the food, don't crash!"),
            Line::from_iter([
                Span::raw("or let the autopilot ("),
                Span::styled("o", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
