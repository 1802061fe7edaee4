use crate::{
    action::Action,
    facelets::{FACELET_COLORS, FaceletState},
};
use std::fmt::Debug;

/// The puzzle interface consumed by the sample generator. Implementors start
/// out solved and own a single mutable current state.
pub trait Puzzle {
    /// A snapshot of the puzzle. `as_ref` yields, for every position, the
    /// identity of the original facelet occupying it.
    type State: Clone + PartialEq + Debug + AsRef<[u8]>;

    /// The canonical color of every original facelet, indexed by facelet
    /// identity.
    const FACELET_COLORS: &'static [u8];

    fn apply_one(&mut self, action: Action);

    fn apply_sequence(&mut self, actions: &[Action]) {
        for &action in actions {
            self.apply_one(action);
        }
    }

    fn current_state(&self) -> Self::State;

    fn set_state(&mut self, state: Self::State);

    /// Return to the solved state.
    fn reset(&mut self);
}

/// A 3x3 cube tracked facelet by facelet.
#[derive(Debug, Clone, Default)]
pub struct Cube3 {
    state: FaceletState,
}

impl Cube3 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &FaceletState {
        &self.state
    }
}

impl Puzzle for Cube3 {
    type State = FaceletState;

    const FACELET_COLORS: &'static [u8] = &FACELET_COLORS;

    fn apply_one(&mut self, action: Action) {
        self.state.apply(action);
    }

    fn current_state(&self) -> FaceletState {
        self.state
    }

    fn set_state(&mut self, state: FaceletState) {
        self.state = state;
    }

    fn reset(&mut self) {
        self.state = FaceletState::solved();
    }
}
