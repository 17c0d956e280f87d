use crate::consts;
use crate::game::grid::{Grid, GridError};
use crate::highscores::{HighScores, LoadError, SaveError};
use crate::options::Options;
use log::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Options initially selected in the main menu
    #[serde(default)]
    pub(crate) options: Options,

    /// Size of the playing field
    #[serde(default)]
    pub(crate) grid: GridConfig,

    /// Settings about data & log files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakepilot").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores are stored: the file given in
    /// the configuration or, if that is not set, the default high scores file
    /// path.  Return `None` if no path is present in the configuration and the
    /// default path could not be computed.
    fn high_scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| default_high_scores_path().map(Cow::from))
    }

    /// Load the high score list from a file.  If the file does not exist, an
    /// empty list is returned.
    ///
    /// If `self.files.save_high_scores` is `false`, an empty list is returned
    /// without reading anything from disk.
    pub(crate) fn load_high_scores(&self) -> Result<HighScores, LoadError> {
        if !self.files.save_high_scores {
            return Ok(HighScores::default());
        }
        match self.high_scores_file() {
            Some(p) => HighScores::load(&p),
            None => Err(LoadError::no_path()),
        }
    }

    /// Save the high score list to a file.
    ///
    /// If `self.files.save_high_scores` is `false`, nothing is saved.
    pub(crate) fn save_high_scores(&self, scores: &HighScores) -> Result<(), SaveError> {
        if !self.files.save_high_scores {
            return Ok(());
        }
        match self.high_scores_file() {
            Some(p) => scores.save(&p),
            None => Err(SaveError::no_path()),
        }
    }
}

fn default_high_scores_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("snakepilot").join("high-scores.json"))
}

/// The `[grid]` table
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GridConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl GridConfig {
    pub(crate) fn to_grid(self) -> Result<Grid, GridError> {
        Grid::new(self.width, self.height)
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: consts::GRID_WIDTH,
            height: consts::GRID_HEIGHT,
        }
    }
}

/// The `[files]` table
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score list should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    pub(crate) save_high_scores: bool,

    /// File to write log messages to.  If unset, nothing is logged.
    pub(crate) log_file: Option<PathBuf>,

    /// Minimum level of log messages to write
    pub(crate) log_level: LevelFilter,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
