use crate::consts::HIGH_SCORE_SLOTS;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::Path;
use thiserror::Error;

/// The best scores achieved so far, highest first.  There are always exactly
/// [`HIGH_SCORE_SLOTS`] entries; unused slots hold zero.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub(crate) struct HighScores(Vec<u32>);

impl HighScores {
    pub(crate) fn scores(&self) -> &[u32] {
        &self.0
    }

    pub(crate) fn best(&self) -> u32 {
        self.0.first().copied().unwrap_or_default()
    }

    /// Offer `score` to the list.  Returns `true` if it earned a place.  A
    /// score of zero never does.
    pub(crate) fn add_score(&mut self, score: u32) -> bool {
        if score == 0 || self.0.last().is_some_and(|&lowest| score < lowest) {
            return false;
        }
        self.0.push(score);
        self.normalize();
        true
    }

    fn normalize(&mut self) {
        self.0.sort_unstable_by_key(|&s| Reverse(s));
        self.0.resize(HIGH_SCORE_SLOTS, 0);
    }

    /// Read high scores from the JSON file at `path`.  A missing file yields
    /// an empty list.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl Default for HighScores {
    fn default() -> HighScores {
        HighScores(vec![0; HIGH_SCORE_SLOTS])
    }
}

impl From<Vec<u32>> for HighScores {
    fn from(scores: Vec<u32>) -> HighScores {
        let mut hs = HighScores(scores);
        hs.normalize();
        hs
    }
}

impl From<HighScores> for Vec<u32> {
    fn from(hs: HighScores) -> Vec<u32> {
        hs.0
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    pub(crate) fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
