mod widgets;
use self::widgets::Instructions;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::{Demo, Game};
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{center_rect, get_display_area, EnumExt, Globals};
use crossterm::event::{poll, read, Event};
use enum_map::{Enum, EnumMap};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};
use std::io;
use std::time::Instant;

/// The main menu, shown over a game played by the autopilot
#[derive(Clone, Debug)]
pub(crate) struct MainMenu<R = ThreadRng> {
    globals: Globals,
    demo: Demo<R>,
    selection: Selection,
    options: OptionsMenu,
    next_tick: Option<Instant>,
}

impl MainMenu<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        MainMenu::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> MainMenu<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> MainMenu<R> {
        MainMenu {
            demo: Demo::new_with_rng(globals.grid, rng),
            options: OptionsMenu::new(globals.options),
            globals,
            selection: Selection::default(),
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + consts::DEMO_TICK_PERIOD);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.demo.advance();
            self.next_tick = None;
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }
}

impl<R> MainMenu<R> {
    /// The width of the pop-up holding the menu
    const WIDTH: u16 = OptionsMenu::WIDTH + 4 /* for border & padding */;

    /// The height of the pop-up holding the menu
    const HEIGHT: u16 = Instructions::HEIGHT + 1 /* Play */ + OptionsMenu::HEIGHT + 1 /* Quit */ + 3 /* spacing */ + 2 /* for border */;

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Game(self.play()))
            }
            (Selection::PlayButton, Command::Prev) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(true));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Left) => self.options.move_left(),
            (Selection::Options, Command::Right) => self.options.move_right(),
            (Selection::Options, Command::Space | Command::Enter) => self.options.toggle(),
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Next) => self.select(Selection::PlayButton, None),
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Options, Some(false));
            }
            _ => (),
        }
        None
    }

    /// Start a new game with the options chosen in the menu
    fn play(&self) -> Game {
        let mut globals = self.globals.clone();
        globals.options = self.options.to_options();
        Game::new(globals)
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        self.selection = selection;
        if selection == Selection::Options {
            if let Some(first) = first_option {
                self.options.selection = if first {
                    Some(OptKey::min())
                } else {
                    Some(OptKey::max())
                };
            }
        } else {
            self.options.selection = None;
        }
    }

    /*
     * ┌────────── SNAKEPILOT ──────────┐
     * │   Steer the snake with:        │
     * │          ← ↓ ↑ →               │
     * │      or: h j k l               │
     * │      or: a s w d               │
     * │   Eat the food, don't crash!   │
     * │   or let the autopilot (o)     │
     * │                                │
     * │           [Play (p)]           │
     * │                                │
     * │ ┌ Options: ──────────────────┐ │
     * │ │   Mode        ◁ Classic  ▶ │ │
     * │ │   Difficulty  ◀ Medium   ▶ │ │
     * │ │   Autopilot       [ ]      │ │
     * │ │   Theme       ◁ Dark     ▶ │ │
     * │ └────────────────────────────┘ │
     * │                                │
     * │           [Quit (q)]           │
     * └────────────────────────────────┘
     */
    fn render_popup(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" SNAKEPILOT ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let [instructions_area, play_area, options_area, quit_area] =
            Layout::vertical([Instructions::HEIGHT, 1, OptionsMenu::HEIGHT, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(inner);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

impl<R> Widget for &MainMenu<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        self.demo
            .board(self.options.to_options().theme)
            .render(display, buf);
        let popup_area = center_rect(
            display,
            Size {
                width: MainMenu::<R>::WIDTH,
                height: MainMenu::<R>::HEIGHT,
            },
        );
        self.render_popup(popup_area, buf);
    }
}

/// A centered `[Label (k)]` line
fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// If the currently-selected main menu item is an element of this menu,
    /// then `selection` is `Some(key)`, where `key` is the key of the selected
    /// item within the `OptionsMenu`.
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].decrease();
        }
    }

    fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].increase();
        }
    }

    fn toggle(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].toggle();
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Difficulty, PlayMode};
    use crate::theme::Theme;
    use crate::util::buffer_lines;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn menu(globals: Globals) -> MainMenu<ChaCha12Rng> {
        MainMenu::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    mod main_menu {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn draw_popup() {
            let menu = menu(Globals::offline());
            let area = Rect::new(
                0,
                0,
                MainMenu::<ChaCha12Rng>::WIDTH,
                MainMenu::<ChaCha12Rng>::HEIGHT,
            );
            let mut buffer = Buffer::empty(area);
            menu.render_popup(area, &mut buffer);
            assert_eq!(
                buffer_lines(&buffer),
                [
                    "┌────────── SNAKEPILOT ──────────┐",
                    "│   Steer the snake with:        │",
                    "│          ← ↓ ↑ →               │",
                    "│      or: h j k l               │",
                    "│      or: a s w d               │",
                    "│   Eat the food, don't crash!   │",
                    "│   or let the autopilot (o)     │",
                    "│                                │",
                    "│           [Play (p)]           │",
                    "│                                │",
                    "│ ┌ Options: ──────────────────┐ │",
                    "│ │   Mode        ◁ Classic  ▶ │ │",
                    "│ │   Difficulty  ◀ Medium   ▶ │ │",
                    "│ │   Autopilot       [ ]      │ │",
                    "│ │   Theme       ◁ Dark     ▶ │ │",
                    "│ └────────────────────────────┘ │",
                    "│                                │",
                    "│           [Quit (q)]           │",
                    "└────────────────────────────────┘",
                ]
            );
            assert_eq!(buffer[(19, 8)].fg, consts::KEY_STYLE.fg.unwrap());
            assert_eq!(
                buffer[(19, 8)].modifier,
                consts::MENU_SELECTION_STYLE.add_modifier
            );
        }

        #[test]
        fn draw_over_demo() {
            let mut globals = Globals::offline();
            globals.options.theme = Theme::Neon;
            let menu = menu(globals);
            let area = Rect::new(0, 0, 80, 24);
            let mut buffer = Buffer::empty(area);
            menu.render(area, &mut buffer);
            let lines = buffer_lines(&buffer);
            assert!(lines
                .iter()
                .any(|ln| ln.contains("┌────────── SNAKEPILOT ──────────┐")));
            assert!(lines[2].trim_start().starts_with('┌'), "{:?}", lines[2]);
            assert!(lines[21].trim_start().starts_with('└'), "{:?}", lines[21]);
            // The demo board is drawn in the menu's theme
            assert_eq!(buffer[(4, 4)].bg, Theme::Neon.palette().background);
        }

        #[test]
        fn select_options() {
            let mut menu = menu(Globals::offline());
            assert!(menu.handle_event(key(KeyCode::Down)).is_none());
            assert_eq!(menu.selection, Selection::Options);
            assert_eq!(menu.options.selection, Some(OptKey::Mode));
            assert!(menu.handle_event(key(KeyCode::Char(' '))).is_none());
            assert!(menu.handle_event(key(KeyCode::Char('j'))).is_none());
            assert!(menu.handle_event(key(KeyCode::Right)).is_none());
            assert!(menu.handle_event(key(KeyCode::Right)).is_none());
            assert!(menu.handle_event(key(KeyCode::Down)).is_none());
            assert!(menu.handle_event(key(KeyCode::Enter)).is_none());
            assert!(menu.handle_event(key(KeyCode::Down)).is_none());
            assert!(menu.handle_event(key(KeyCode::Left)).is_none());
            assert_eq!(
                menu.options.to_options(),
                Options {
                    mode: PlayMode::Peaceful,
                    difficulty: Difficulty::Hard,
                    autopilot: true,
                    theme: Theme::Dark,
                }
            );
            assert!(menu.handle_event(key(KeyCode::Right)).is_none());
            assert_eq!(menu.options.to_options().theme, Theme::Nokia);
            assert!(menu.handle_event(key(KeyCode::Down)).is_none());
            assert_eq!(menu.selection, Selection::QuitButton);
            assert_eq!(menu.options.selection, None);
        }

        #[test]
        fn play() {
            let mut menu = menu(Globals::offline());
            assert!(menu.handle_event(key(KeyCode::Down)).is_none());
            assert!(menu.handle_event(key(KeyCode::Right)).is_none());
            assert!(matches!(
                menu.handle_event(key(KeyCode::Char('p'))),
                Some(Screen::Game(_))
            ));
            assert!(menu.handle_event(key(KeyCode::Home)).is_none());
            assert!(matches!(
                menu.handle_event(key(KeyCode::Enter)),
                Some(Screen::Game(_))
            ));
        }

        #[test]
        fn quit() {
            let mut menu = menu(Globals::offline());
            assert!(matches!(
                menu.handle_event(key(KeyCode::Char('q'))),
                Some(Screen::Quit)
            ));
            assert!(matches!(
                menu.handle_event(Event::Key(crossterm::event::KeyEvent::new(
                    KeyCode::Char('c'),
                    KeyModifiers::CONTROL
                ))),
                Some(Screen::Quit)
            ));
            assert!(menu.handle_event(key(KeyCode::End)).is_none());
            assert_eq!(menu.selection, Selection::QuitButton);
            assert!(matches!(
                menu.handle_event(key(KeyCode::Enter)),
                Some(Screen::Quit)
            ));
        }

        /// Test that tabbing to the end of the options menu and then tabbing
        /// again until you loop back around to the options menu puts you at
        /// the start of the options.
        #[test]
        fn tab_wraparound() {
            let mut menu = menu(Globals::offline());
            assert_eq!(menu.options.selection, None);
            for _ in OptKey::iter() {
                assert!(menu.handle_event(key(KeyCode::Tab)).is_none());
            }
            assert_eq!(menu.options.selection, Some(OptKey::max()));
            assert!(menu.handle_event(key(KeyCode::Tab)).is_none());
            assert_eq!(menu.options.selection, None);
            assert!(menu.handle_event(key(KeyCode::Tab)).is_none());
            assert!(menu.handle_event(key(KeyCode::Tab)).is_none());
            assert_eq!(menu.options.selection, Some(OptKey::min()));
        }

        #[test]
        fn back_tab_from_play() {
            let mut menu = menu(Globals::offline());
            assert!(menu.handle_event(key(KeyCode::BackTab)).is_none());
            assert_eq!(menu.selection, Selection::QuitButton);
            assert!(menu.handle_event(key(KeyCode::BackTab)).is_none());
            assert_eq!(menu.selection, Selection::Options);
            assert_eq!(menu.options.selection, Some(OptKey::Theme));
        }
    }

    mod options_menu {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn roundtrip_defaults() {
            let opts = Options::default();
            let optmenu = OptionsMenu::new(opts);
            assert_eq!(optmenu.to_options(), opts);
        }

        #[test]
        fn roundtrip_custom() {
            let opts = Options {
                mode: PlayMode::Peaceful,
                difficulty: Difficulty::Easy,
                autopilot: true,
                theme: Theme::Desert,
            };
            let optmenu = OptionsMenu::new(opts);
            assert_eq!(optmenu.to_options(), opts);
        }

        #[test]
        fn adjust_without_selection() {
            let mut optmenu = OptionsMenu::new(Options::default());
            optmenu.move_left();
            optmenu.move_right();
            optmenu.toggle();
            assert_eq!(optmenu.to_options(), Options::default());
            assert_eq!(optmenu.move_up(), None);
            assert_eq!(optmenu.move_down(), None);
        }
    }
}
