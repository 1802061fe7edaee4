use crate::sampler::WanderOrigin;
use cube_core::{ACTION_COUNT, PathsError};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;

pub const TRAIN_SEED: u64 = 133_742_247_331;
pub const VAL_SEED: u64 = 272_497_620;

/// Parameters of one stream of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    /// The declared number of samples.
    pub size: usize,
    /// How many recolored samples are emitted per move.
    pub colors: usize,
    /// The scramble length of each episode.
    pub wander: usize,
    pub seed: u64,
    #[serde(default)]
    pub wander_origin: WanderOrigin,
}

/// Training and validation settings, in TOML:
///
/// ```toml
/// paths = "antipodes.txt" # optional, defaults to the built-in table
///
/// [train]
/// size = 100000
/// colors = 10
/// wander = 0
/// seed = 133742247331
///
/// [val]
/// size = 1000
/// colors = 1
/// wander = 0
/// seed = 272497620
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataModuleConfig {
    /// A canonical path table to use instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathBuf>,
    pub train: SplitConfig,
    pub val: SplitConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`colors` must be at least 1 so that every move produces a sample")]
    NoColors,
    #[error(
        "`wander` is {wander}, but scrambles are drawn without replacement from only {ACTION_COUNT} actions"
    )]
    WanderTooLong { wander: usize },
    #[error("Could not read the configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Could not parse the configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize the configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Paths(#[from] PathsError),
}

impl SplitConfig {
    #[must_use]
    pub const fn new(size: usize, colors: usize, wander: usize, seed: u64) -> Self {
        Self {
            size,
            colors,
            wander,
            seed,
            wander_origin: WanderOrigin::Solved,
        }
    }

    #[must_use]
    pub const fn with_wander_origin(mut self, wander_origin: WanderOrigin) -> Self {
        self.wander_origin = wander_origin;
        self
    }

    /// # Errors
    ///
    /// If `colors` is zero or `wander` exceeds the number of actions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors == 0 {
            return Err(ConfigError::NoColors);
        }
        if self.wander > ACTION_COUNT {
            return Err(ConfigError::WanderTooLong {
                wander: self.wander,
            });
        }
        Ok(())
    }
}

impl Default for DataModuleConfig {
    fn default() -> Self {
        Self {
            paths: None,
            train: SplitConfig::new(10, 10, 0, TRAIN_SEED),
            val: SplitConfig::new(1, 1, 0, VAL_SEED),
        }
    }
}

impl DataModuleConfig {
    /// # Errors
    ///
    /// If the text is not a valid configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// If the file cannot be read or is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// # Errors
    ///
    /// If the configuration cannot be represented as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// If either split is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.train.validate()?;
        self.val.validate()
    }
}
