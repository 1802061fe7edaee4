//! Labeled training samples for next-move prediction on the 3x3.
//!
//! A [`PathSampler`] scrambles the cube, picks a canonical path and walks it
//! one move at a time. For every move, a [`ColorPermutor`] produces several
//! randomly recolored encodings of the (pre, post, finish) states. The
//! [`SampleGenerator`] stitches the two together into a flat sequence of
//! `(features, label)` samples.

pub mod config;
pub mod data_module;
pub mod encoder;
pub mod generator;
pub mod random;
pub mod sampler;

pub use config::{ConfigError, DataModuleConfig, SplitConfig};
pub use data_module::{DataModule, Split};
pub use encoder::{COLOR_CODES, ColorPermutor, decode_color};
pub use generator::{FEATURE_WIDTH, GeneratorError, LABEL_WIDTH, Sample, SampleGenerator};
pub use random::RandomSource;
pub use sampler::{Episode, PathSampler, SamplerError, Step, WanderOrigin};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
