use crate::{
    config::{ConfigError, SplitConfig},
    encoder::{CODE_WIDTH, ColorPermutor},
    random::RandomSource,
    sampler::{PathSampler, SamplerError},
    start,
};
use cube_core::{ACTION_COUNT, Action, CanonicalPaths, Cube3, FACELET_COUNT, Puzzle};
use log::{debug, trace};
use thiserror::Error;

/// Pre, post and finish.
pub const SNAPSHOT_COUNT: usize = 3;
pub const FEATURE_WIDTH: usize = SNAPSHOT_COUNT * FACELET_COUNT * CODE_WIDTH;
pub const LABEL_WIDTH: usize = ACTION_COUNT;

/// One training example: three recolored snapshots and the one-hot action
/// that turned the first into the second.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: Vec<f32>,
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    #[error("Index {index} is out of range for a dataset of {size} samples")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("Samples must be requested in order, expected index {expected} but got {requested}")]
    OutOfOrder { expected: usize, requested: usize },
    #[error("Move {action} produced no encodings, `colors` must be at least 1")]
    NoEncodings { action: Action },
}

struct Pending {
    permutor: ColorPermutor,
    action: Action,
}

/// A stateful, strictly sequential stream of samples with a declared length.
///
/// Each move of each episode is emitted `colors` times with independent
/// relabelings before the sampler advances. The declared length is unrelated
/// to how many episodes end up being consumed.
pub struct SampleGenerator<P: Puzzle = Cube3, R: RandomSource = fastrand::Rng> {
    config: SplitConfig,
    rng: R,
    sampler: PathSampler<P>,
    pending: Option<Pending>,
    emitted: usize,
}

impl Sample {
    fn new(bits: &[u8], action: Action) -> Self {
        let mut label = vec![0.0; LABEL_WIDTH];
        label[action.index()] = 1.0;
        Self {
            features: bits.iter().map(|&bit| f32::from(bit)).collect(),
            label,
        }
    }

    /// The action marked in the label.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.label
            .iter()
            .position(|&x| x > 0.5)
            .and_then(Action::from_index)
    }
}

impl SampleGenerator {
    /// A generator over the facelet cube seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn new(config: SplitConfig, paths: CanonicalPaths) -> Result<Self, ConfigError> {
        Self::from_parts(
            config,
            Cube3::new(),
            paths,
            fastrand::Rng::with_seed(config.seed),
        )
    }
}

impl<P: Puzzle, R: RandomSource> SampleGenerator<P, R> {
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn from_parts(
        config: SplitConfig,
        puzzle: P,
        paths: CanonicalPaths,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            start!("Sample generator: {} samples, {} colors per move, wander {}, seed {}"),
            config.size, config.colors, config.wander, config.seed
        );
        Ok(Self {
            config,
            rng,
            sampler: PathSampler::new(puzzle, paths).with_wander_origin(config.wander_origin),
            pending: None,
            emitted: 0,
        })
    }

    /// The declared number of samples.
    pub fn len(&self) -> usize {
        self.config.size
    }

    pub fn is_empty(&self) -> bool {
        self.config.size == 0
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// How many samples have been produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn sampler(&self) -> &PathSampler<P> {
        &self.sampler
    }

    /// Produce the next sample, moving on to the next move (and, when the
    /// active path is used up, the next episode) once the current move's
    /// recolorings run out. This ignores the declared length.
    ///
    /// # Errors
    ///
    /// If the path sampler reports a violated precondition, or a move yields
    /// no encodings because `colors` is zero.
    pub fn next_sample(&mut self) -> Result<Sample, GeneratorError> {
        if let Some(pending) = &mut self.pending {
            if let Some(bits) = pending.permutor.next_encoding(&mut self.rng) {
                let action = pending.action;
                return Ok(self.emit(&bits, action));
            }
        }

        if self.sampler.needs_episode() {
            self.sampler
                .begin_episode(&mut self.rng, self.config.wander)?;
        }
        let step = self.sampler.next_step()?;

        let mut permutor = ColorPermutor::new(
            &[step.pre, step.post, step.finish],
            P::FACELET_COLORS,
            self.config.colors,
        );
        let bits = permutor
            .next_encoding(&mut self.rng)
            .ok_or(GeneratorError::NoEncodings {
                action: step.action,
            })?;
        self.pending = Some(Pending {
            permutor,
            action: step.action,
        });

        Ok(self.emit(&bits, step.action))
    }

    /// Index-style access for callers that expect a dataset. Indices must be
    /// requested in increasing order starting at zero.
    ///
    /// # Errors
    ///
    /// If `index` is past the declared length or not the next index in order.
    pub fn sample_at(&mut self, index: usize) -> Result<Sample, GeneratorError> {
        if index >= self.config.size {
            return Err(GeneratorError::IndexOutOfRange {
                index,
                size: self.config.size,
            });
        }
        if index != self.emitted {
            return Err(GeneratorError::OutOfOrder {
                expected: self.emitted,
                requested: index,
            });
        }
        self.next_sample()
    }

    fn emit(&mut self, bits: &[u8], action: Action) -> Sample {
        trace!("Sample {} labeled {action}", self.emitted);
        self.emitted += 1;
        Sample::new(bits, action)
    }
}

impl<P: Puzzle, R: RandomSource> Iterator for SampleGenerator<P, R> {
    type Item = Result<Sample, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        (self.emitted < self.config.size).then(|| self.next_sample())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.config.size.saturating_sub(self.emitted);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(size: usize, colors: usize, paths: &str) -> SampleGenerator {
        SampleGenerator::new(SplitConfig::new(size, colors, 0, 0), paths.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_sample_label() {
        let action: Action = "F'".parse().unwrap();
        let sample = Sample::new(&[0, 1, 1], action);
        assert_eq!(sample.features, [0.0_f32, 1.0, 1.0]);
        assert_eq!(sample.label.len(), LABEL_WIDTH);
        assert_eq!(sample.label.iter().sum::<f32>(), 1.0);
        assert_eq!(sample.action(), Some(action));
    }

    #[test]
    fn test_feature_width() {
        assert_eq!(FEATURE_WIDTH, 486);
        let mut generator = generator(3, 1, "R U F");
        for sample in generator.by_ref() {
            let sample = sample.unwrap();
            assert_eq!(sample.features.len(), FEATURE_WIDTH);
            assert!(sample.features.iter().all(|&x| x == 0.0 || x == 1.0));
        }
        assert_eq!(generator.emitted(), 3);
    }

    #[test]
    fn test_sample_at_must_be_sequential() {
        let mut generator = generator(3, 2, "R U");
        assert!(generator.sample_at(0).is_ok());
        assert!(matches!(
            generator.sample_at(2),
            Err(GeneratorError::OutOfOrder {
                expected: 1,
                requested: 2
            })
        ));
        assert!(generator.sample_at(1).is_ok());
        assert!(generator.sample_at(2).is_ok());
        assert!(matches!(
            generator.sample_at(3),
            Err(GeneratorError::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_iterator_stops_at_declared_length() {
        let samples = generator(7, 3, "R");
        assert_eq!(samples.size_hint(), (7, Some(7)));
        assert_eq!(samples.count(), 7);
        assert_eq!(generator(0, 3, "R").count(), 0);
    }

    #[test]
    fn test_zero_colors_is_an_error_not_an_empty_sample() {
        // Skips the validation in `from_parts`
        let mut generator = SampleGenerator {
            config: SplitConfig::new(2, 0, 0, 0),
            rng: fastrand::Rng::with_seed(0),
            sampler: PathSampler::new(Cube3::new(), "R".parse().unwrap()),
            pending: None,
            emitted: 0,
        };
        assert!(matches!(
            generator.next_sample(),
            Err(GeneratorError::NoEncodings { action }) if action.to_string() == "R"
        ));
        assert_eq!(generator.emitted(), 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let paths: CanonicalPaths = "R".parse().unwrap();
        assert!(matches!(
            SampleGenerator::new(SplitConfig::new(1, 0, 0, 0), paths.clone()),
            Err(ConfigError::NoColors)
        ));
        assert!(matches!(
            SampleGenerator::new(SplitConfig::new(1, 1, 19, 0), paths),
            Err(ConfigError::WanderTooLong { wander: 19 })
        ));
    }
}
