use crate::{
    config::{ConfigError, DataModuleConfig, SplitConfig},
    generator::SampleGenerator,
    success,
};
use cube_core::CanonicalPaths;
use log::info;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
}

/// The training and validation sample streams, built from one configuration
/// and one canonical path table. Every call builds a fresh generator from the
/// split's seed, so repeated epochs see the same samples.
#[derive(Debug, Clone)]
pub struct DataModule {
    config: DataModuleConfig,
    paths: CanonicalPaths,
}

impl DataModule {
    /// Validate `config` and load its path table, falling back to the built-in
    /// antipodes when none is configured.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid or the path table cannot be loaded.
    pub fn new(config: DataModuleConfig) -> Result<Self, ConfigError> {
        let paths = match &config.paths {
            Some(path) => CanonicalPaths::load(path)?,
            None => CanonicalPaths::antipodes(),
        };
        Self::with_paths(config, paths)
    }

    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn with_paths(config: DataModuleConfig, paths: CanonicalPaths) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            success!("Data module ready: {} train and {} val samples over {} canonical paths"),
            config.train.size,
            config.val.size,
            paths.len()
        );
        Ok(Self { config, paths })
    }

    pub fn config(&self) -> &DataModuleConfig {
        &self.config
    }

    pub fn paths(&self) -> &CanonicalPaths {
        &self.paths
    }

    pub fn split_config(&self, split: Split) -> &SplitConfig {
        match split {
            Split::Train => &self.config.train,
            Split::Val => &self.config.val,
        }
    }

    /// # Errors
    ///
    /// If the split's configuration is invalid.
    pub fn samples(&self, split: Split) -> Result<SampleGenerator, ConfigError> {
        SampleGenerator::new(*self.split_config(split), self.paths.clone())
    }

    /// # Errors
    ///
    /// If the training configuration is invalid.
    pub fn train(&self) -> Result<SampleGenerator, ConfigError> {
        self.samples(Split::Train)
    }

    /// # Errors
    ///
    /// If the validation configuration is invalid.
    pub fn val(&self) -> Result<SampleGenerator, ConfigError> {
        self.samples(Split::Val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_default_module() {
        let module = DataModule::new(DataModuleConfig::default()).unwrap();
        assert_eq!(module.paths().len(), 8);

        let train = module.train().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        let val = module.val().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(train.len(), 10);
        assert_eq!(val.len(), 1);

        // Ten colors per move: all training samples share the first move
        assert!(train.iter().map(|sample| sample.action()).all_equal());
    }

    #[test]
    fn test_epochs_repeat() {
        let module = DataModule::new(DataModuleConfig::default()).unwrap();
        let first = module.train().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        let second = module.train().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_path_file() {
        let config = DataModuleConfig {
            paths: Some("does/not/exist.txt".into()),
            ..DataModuleConfig::default()
        };
        assert!(matches!(
            DataModule::new(config),
            Err(ConfigError::Paths(_))
        ));
    }

    #[test]
    fn test_invalid_split_is_rejected_up_front() {
        let mut config = DataModuleConfig::default();
        config.train.wander = 40;
        assert!(matches!(
            DataModule::with_paths(config, CanonicalPaths::antipodes()),
            Err(ConfigError::WanderTooLong { wander: 40 })
        ));
    }
}
