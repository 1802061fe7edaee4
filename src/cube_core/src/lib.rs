//! The 3x3 cube collaborator of the sample generator: the 18 face turns, a
//! facelet-level puzzle state, and the table of canonical paths that episodes
//! are drawn from.

pub mod action;
pub mod facelets;
pub mod paths;
pub mod puzzle;

pub use action::{ACTION_COUNT, Action, Face, ParseActionError, Turn, parse_algorithm};
pub use facelets::{COLOR_COUNT, FACELET_COLORS, FACELET_COUNT, FaceletState};
pub use paths::{CanonicalPaths, PathsError};
pub use puzzle::{Cube3, Puzzle};
