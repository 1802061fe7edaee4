use crate::{random::RandomSource, working};
use cube_core::{ACTION_COUNT, Action, CanonicalPaths, Puzzle};
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the scramble of a new episode starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WanderOrigin {
    /// Scramble the solved state.
    #[default]
    Solved,
    /// Keep wandering from wherever the previous episode left the puzzle.
    Previous,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamplerError {
    #[error("No episode has begun, call `begin_episode` first")]
    NoActiveEpisode,
    #[error("The path of the active episode is exhausted, call `begin_episode` first")]
    EpisodeExhausted,
    #[error(
        "A scramble of {wander} moves cannot be drawn without replacement from {ACTION_COUNT} actions"
    )]
    WanderTooLong { wander: usize },
}

/// One scramble followed by one canonical path.
#[derive(Debug, Clone)]
pub struct Episode<S> {
    start: S,
    finish: S,
    path_index: usize,
    path: Box<[Action]>,
    cursor: usize,
}

/// A single move of an episode together with the states around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    pub pre: S,
    pub post: S,
    pub finish: S,
    pub action: Action,
}

/// Draws episodes and walks them one move at a time. The sampler never starts
/// an episode on its own; once `needs_episode` is true the caller decides when
/// to call `begin_episode`.
pub struct PathSampler<P: Puzzle> {
    puzzle: P,
    paths: CanonicalPaths,
    wander_origin: WanderOrigin,
    episode: Option<Episode<P::State>>,
    episodes_begun: usize,
}

impl<S> Episode<S> {
    /// The scrambled state the path is replayed from.
    pub fn start(&self) -> &S {
        &self.start
    }

    /// The state reached after replaying the whole path.
    pub fn finish(&self) -> &S {
        &self.finish
    }

    /// Which entry of the canonical path table was drawn.
    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn path(&self) -> &[Action] {
        &self.path
    }

    pub fn remaining(&self) -> &[Action] {
        &self.path[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.path.len()
    }
}

impl<P: Puzzle> PathSampler<P> {
    pub fn new(puzzle: P, paths: CanonicalPaths) -> Self {
        Self {
            puzzle,
            paths,
            wander_origin: WanderOrigin::default(),
            episode: None,
            episodes_begun: 0,
        }
    }

    #[must_use]
    pub fn with_wander_origin(mut self, wander_origin: WanderOrigin) -> Self {
        self.wander_origin = wander_origin;
        self
    }

    /// Scramble the puzzle with the first `wander` entries of a random
    /// permutation of the actions, then draw a canonical path uniformly and
    /// record where it leads. The puzzle is left at the start state.
    ///
    /// The action permutation is drawn even when `wander` is zero, so the
    /// random stream is consumed the same way for every scramble length.
    ///
    /// # Errors
    ///
    /// If `wander` exceeds the number of actions.
    pub fn begin_episode<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        wander: usize,
    ) -> Result<&Episode<P::State>, SamplerError> {
        if wander > ACTION_COUNT {
            return Err(SamplerError::WanderTooLong { wander });
        }

        if self.wander_origin == WanderOrigin::Solved {
            self.puzzle.reset();
        }

        let scramble = rng
            .permutation(ACTION_COUNT)
            .into_iter()
            .take(wander)
            .filter_map(Action::from_index)
            .collect_vec();
        self.puzzle.apply_sequence(&scramble);
        let start = self.puzzle.current_state();

        let path_index = rng.below(self.paths.len());
        let path: Box<[Action]> = self.paths[path_index].into();
        self.puzzle.apply_sequence(&path);
        let finish = self.puzzle.current_state();
        self.puzzle.set_state(start.clone());

        self.episodes_begun += 1;
        debug!(
            working!("Episode {}: scramble [{}], path {} ({} moves)"),
            self.episodes_begun,
            scramble.iter().join(" "),
            path_index,
            path.len(),
        );

        Ok(self.episode.insert(Episode {
            start,
            finish,
            path_index,
            path,
            cursor: 0,
        }))
    }

    /// Apply the next move of the active episode.
    ///
    /// # Errors
    ///
    /// If no episode has begun or the active one is exhausted. Both mean the
    /// caller skipped `begin_episode`.
    pub fn next_step(&mut self) -> Result<Step<P::State>, SamplerError> {
        let episode = self
            .episode
            .as_mut()
            .ok_or(SamplerError::NoActiveEpisode)?;
        let &action = episode
            .path
            .get(episode.cursor)
            .ok_or(SamplerError::EpisodeExhausted)?;
        episode.cursor += 1;

        let pre = self.puzzle.current_state();
        self.puzzle.apply_one(action);
        let post = self.puzzle.current_state();
        trace!(
            "Step {action} ({} of {})",
            episode.cursor,
            episode.path.len()
        );

        Ok(Step {
            pre,
            post,
            finish: episode.finish.clone(),
            action,
        })
    }

    pub fn episode(&self) -> Option<&Episode<P::State>> {
        self.episode.as_ref()
    }

    /// Whether `begin_episode` must be called before the next `next_step`.
    pub fn needs_episode(&self) -> bool {
        self.episode.as_ref().is_none_or(Episode::is_exhausted)
    }

    pub fn episodes_begun(&self) -> usize {
        self.episodes_begun
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn paths(&self) -> &CanonicalPaths {
        &self.paths
    }
}
