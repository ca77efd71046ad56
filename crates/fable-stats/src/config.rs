use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Tuning for one candidate-generation loop.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    /// Candidates drawn before an early stop is allowed.
    pub min_attempts: u32,
    /// Hard cap on candidates, degenerate draws included.
    pub max_attempts: u32,
    /// Best score at which the loop stops early.
    pub score_threshold: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            min_attempts: 10,
            max_attempts: 200,
            score_threshold: 0.9,
        }
    }
}

/// Driver tuning, optionally overridden by a `fable.toml` in the data
/// directory. Word-seeded runs search longer and hold out for a better
/// score, since they also have to land the requested word's category.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub pos: LoopConfig,
    pub tell: TellLoopConfig,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TellLoopConfig {
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub score_threshold: f64,
}

impl Default for TellLoopConfig {
    fn default() -> Self {
        Self {
            min_attempts: 15,
            max_attempts: 300,
            score_threshold: 0.97,
        }
    }
}

impl DriverConfig {
    /// Read `fable.toml` from the data directory, falling back to defaults
    /// when the file does not exist.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("fable.toml");
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no driver config; using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(StatsError::Io { path, source }),
        };
        Ok(toml::from_str(&content)?)
    }
}
