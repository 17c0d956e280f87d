use ratatui::style::Color;
use serde::Deserialize;
use std::fmt;

/// A built-in color scheme for the playing field
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Dark,
    Nokia,
    Retro,
    Neon,
    Desert,
}

impl Theme {
    pub(crate) const ALL: [Theme; 5] = [
        Theme::Dark,
        Theme::Nokia,
        Theme::Retro,
        Theme::Neon,
        Theme::Desert,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Nokia => "Nokia",
            Theme::Retro => "Retro",
            Theme::Neon => "Neon",
            Theme::Desert => "Desert",
        }
    }

    pub(crate) fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Rgb(30, 30, 30),
                border: Color::Rgb(90, 90, 90),
                head: Color::Rgb(0, 200, 0),
                body: Color::Rgb(0, 255, 0),
                tail: Color::Rgb(0, 150, 0),
                food: Color::Rgb(255, 0, 0),
            },
            Theme::Nokia => Palette {
                background: Color::Rgb(199, 204, 190),
                border: Color::Rgb(50, 60, 40),
                head: Color::Rgb(50, 60, 40),
                body: Color::Rgb(71, 84, 62),
                tail: Color::Rgb(100, 110, 90),
                food: Color::Rgb(71, 84, 62),
            },
            Theme::Retro => Palette {
                background: Color::Rgb(155, 188, 15),
                border: Color::Rgb(111, 145, 27),
                head: Color::Rgb(48, 98, 48),
                body: Color::Rgb(75, 139, 72),
                tail: Color::Rgb(111, 145, 27),
                food: Color::Rgb(15, 56, 15),
            },
            Theme::Neon => Palette {
                background: Color::Rgb(10, 10, 10),
                border: Color::Rgb(60, 60, 60),
                head: Color::Rgb(127, 255, 0),
                body: Color::Rgb(57, 255, 20),
                tail: Color::Rgb(0, 255, 100),
                food: Color::Rgb(255, 0, 255),
            },
            Theme::Desert => Palette {
                background: Color::Rgb(233, 221, 199),
                border: Color::Rgb(204, 153, 102),
                head: Color::Rgb(153, 102, 51),
                body: Color::Rgb(181, 101, 29),
                tail: Color::Rgb(214, 133, 74),
                food: Color::Rgb(214, 133, 74),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The colors used to draw a board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) border: Color,
    pub(crate) head: Color,
    pub(crate) body: Color,
    pub(crate) tail: Color,
    pub(crate) food: Color,
}

impl Palette {
    /// Return the color for segment `index` (counting from zero at the head)
    /// of a snake with `len` segments.  The body fades from `body` to `tail`.
    pub(crate) fn segment_color(&self, index: usize, len: usize) -> Color {
        if index == 0 {
            self.head
        } else {
            blend(
                self.body,
                self.tail,
                index - 1,
                len.saturating_sub(2),
            )
        }
    }
}

/// Return the color `num / den` of the way from `from` to `to`.  A zero
/// `den` yields `to`.  Non-RGB colors are not blended.
fn blend(from: Color, to: Color, num: usize, den: usize) -> Color {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (from, to) else {
        return from;
    };
    if den == 0 {
        return to;
    }
    let num = num.min(den);
    let mix = |a: u8, b: u8| {
        let v = (usize::from(a) * (den - num) + usize::from(b) * num) / den;
        u8::try_from(v).unwrap_or(u8::MAX)
    };
    Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
}
