mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod menu;
mod options;
mod theme;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::util::{error_chain, Globals};
use anyhow::Context;
use lexopt::{Arg, Parser};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run { config })
    }
}

const USAGE: &str = concat!(
    "Usage: snakepilot [-c|--config <path>]\n",
    "\n",
    "Play snake in the terminal, or let the autopilot play it for you\n",
    "\n",
    "Options:\n",
    "  -c <path>, --config <path>\n",
    "                    Read configuration from the given file\n",
    "  -h, --help        Show this help message and exit\n",
    "  -V, --version     Show the program version and exit\n",
);

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run { config }) => match setup(config) {
            Ok(globals) => {
                let terminal = ratatui::init();
                let r = App::new(globals).run(terminal);
                ratatui::restore();
                io_exit(r)
            }
            Err(e) => {
                eprintln!("snakepilot: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakepilot: {e}");
            eprintln!("Run `snakepilot --help` for usage");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration, start logging, and gather everything the screens
/// need
fn setup(config_path: Option<PathBuf>) -> anyhow::Result<Globals> {
    let config = match config_path {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
    };
    let grid = config
        .grid
        .to_grid()
        .context("invalid grid size in configuration")?;
    init_logging(&config)?;
    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let high_scores = config.load_high_scores().unwrap_or_else(|e| {
        log::warn!("{}", error_chain(&e));
        Default::default()
    });
    Ok(Globals {
        options: config.options,
        config,
        grid,
        high_scores,
    })
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    if let Some(ref path) = config.files.log_file {
        let file = fs_err::File::create(path).context("failed to open log file")?;
        WriteLogger::init(config.files.log_level, simplelog::Config::default(), file)
            .context("failed to initialize logger")?;
    }
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("snakepilot: {e}");
            ExitCode::FAILURE
        }
    }
}
