use crate::consts;
use crate::theme::Theme;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// The settings chosen in the main menu for the next game
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) mode: PlayMode,
    pub(crate) difficulty: Difficulty,
    pub(crate) autopilot: bool,
    pub(crate) theme: Theme,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Mode => self.mode.into(),
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::Autopilot => self.autopilot.into(),
            OptKey::Theme => self.theme.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Mode => {
                self.mode = value
                    .try_into()
                    .expect("Options::set(Mode, value) called with non-PlayMode value");
            }
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::Autopilot => {
                self.autopilot = value
                    .try_into()
                    .expect("Options::set(Autopilot, value) called with non-Bool value");
            }
            OptKey::Theme => {
                self.theme = value
                    .try_into()
                    .expect("Options::set(Theme, value) called with non-Theme value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Mode,
    Difficulty,
    Autopilot,
    Theme,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Mode => "Mode",
            OptKey::Difficulty => "Difficulty",
            OptKey::Autopilot => "Autopilot",
            OptKey::Theme => "Theme",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    PlayMode,
    Difficulty,
    Theme,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 12;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn arrows<T: Adjustable + fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            value: &T,
        ) -> fmt::Result {
            write!(
                f,
                "{left} {value:8} {right}",
                left = if value.can_decrease() { '◀' } else { '◁' },
                right = if value.can_increase() { '▶' } else { '▷' }
            )
        }

        match self {
            OptValue::Bool(false) => write!(f, "    [ ]     "),
            OptValue::Bool(true) => write!(f, "    [✓]     "),
            OptValue::PlayMode(mode) => arrows(f, mode),
            OptValue::Difficulty(diff) => arrows(f, diff),
            OptValue::Theme(theme) => arrows(f, theme),
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// Whether the walls & the snake's own body are deadly
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PlayMode {
    /// Leaving the grid or running into the snake's body ends the round
    #[default]
    Classic,

    /// The grid wraps around and the snake passes through itself
    Peaceful,
}

impl PlayMode {
    pub(crate) fn is_peaceful(self) -> bool {
        self == PlayMode::Peaceful
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayMode::Classic => "Classic",
            PlayMode::Peaceful => "Peaceful",
        };
        f.pad(name)
    }
}

impl Adjustable for PlayMode {
    fn increase(&mut self) {
        *self = PlayMode::Peaceful;
    }

    fn decrease(&mut self) {
        *self = PlayMode::Classic;
    }

    fn toggle(&mut self) {
        *self = match self {
            PlayMode::Classic => PlayMode::Peaceful,
            PlayMode::Peaceful => PlayMode::Classic,
        };
    }

    fn can_increase(&self) -> bool {
        *self == PlayMode::Classic
    }

    fn can_decrease(&self) -> bool {
        *self == PlayMode::Peaceful
    }
}

/// How quickly the game speeds up as the score rises
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub(crate) const MINIMUM: Difficulty = Difficulty::Easy;
    pub(crate) const MAXIMUM: Difficulty = Difficulty::Hard;

    /// The per-point increase of the speed multiplier, in parts per million
    pub(crate) fn increment_ppm(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 3_750,
            Difficulty::Hard => 17_500,
        }
    }

    /// The factor by which the tick rate at `score` exceeds the base rate
    pub(crate) fn speed_multiplier(self, score: u32) -> f64 {
        f64::from(score).mul_add(f64::from(self.increment_ppm()) / 1_000_000.0, 1.0)
    }

    /// The speed-up at `score` as a whole number of percent, rounded down
    pub(crate) fn speed_percent(self, score: u32) -> u64 {
        u64::from(score) * u64::from(self.increment_ppm()) / 10_000
    }

    /// The number of snake movements per second at `score`, rounded down
    pub(crate) fn ticks_per_second(self, score: u32) -> u64 {
        let ppm = 1_000_000 + u64::from(score) * u64::from(self.increment_ppm());
        consts::BASE_TICKS_PER_SECOND * ppm / 1_000_000
    }

    /// Time between movements of the snake at `score`
    pub(crate) fn tick_period(self, score: u32) -> Duration {
        Duration::from_micros(1_000_000 / self.ticks_per_second(score).max(1))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.pad(name)
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        match self {
            Difficulty::Easy => *self = Difficulty::Medium,
            Difficulty::Medium => *self = Difficulty::Hard,
            Difficulty::Hard => (),
        }
    }

    fn decrease(&mut self) {
        match self {
            Difficulty::Easy => (),
            Difficulty::Medium => *self = Difficulty::Easy,
            Difficulty::Hard => *self = Difficulty::Medium,
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Self::MAXIMUM
    }

    fn can_decrease(&self) -> bool {
        *self != Self::MINIMUM
    }
}

impl Adjustable for Theme {
    fn increase(&mut self) {
        let current = *self;
        if let Some(&next) = Theme::ALL.iter().skip_while(|&&t| t != current).nth(1) {
            *self = next;
        }
    }

    fn decrease(&mut self) {
        let current = *self;
        if let Some(&prev) = Theme::ALL
            .iter()
            .rev()
            .skip_while(|&&t| t != current)
            .nth(1)
        {
            *self = prev;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        Theme::ALL.last() != Some(self)
    }

    fn can_decrease(&self) -> bool {
        Theme::ALL.first() != Some(self)
    }
}
