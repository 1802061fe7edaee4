//! Facelet-level 3x3 puzzle states.
//!
//! Positions are numbered in `U R F D L B` face order and row-major within a
//! face as seen from outside the cube, which is the layout of the usual
//! 54-letter facelet strings:
//!
//! ```text
//!              |U0 U1 U2|
//!              |U3 U4 U5|
//!              |U6 U7 U8|
//!  |L36 L37 L38|F18 F19 F20|R9  R10 R11|B45 B46 B47|
//!  |L39 L40 L41|F21 F22 F23|R12 R13 R14|B48 B49 B50|
//!  |L42 L43 L44|F24 F25 F26|R15 R16 R17|B51 B52 B53|
//!              |D27 D28 D29|
//!              |D30 D31 D32|
//!              |D33 D34 D35|
//! ```

use crate::action::{ACTION_COUNT, Action, Face};
use std::fmt;

pub const FACELET_COUNT: usize = 54;
pub const COLOR_COUNT: usize = 6;

/// The canonical color of every original facelet: nine of each color, in
/// face order.
pub const FACELET_COLORS: [u8; FACELET_COUNT] = {
    let mut arr = [0; FACELET_COUNT];
    let mut i = 0;
    while i < FACELET_COUNT {
        arr[i] = (i / 9) as u8;
        i += 1;
    }
    arr
};

/// Where each facelet goes under a clockwise quarter turn of each face, in
/// `U R F D L B` order.
#[rustfmt::skip]
const QUARTER_TURNS: [[u8; FACELET_COUNT]; 6] = [
    // U
    [2, 5, 8, 1, 4, 7, 0, 3, 6, 18, 19, 20, 12, 13, 14, 15, 16, 17, 36, 37, 38, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 45, 46, 47, 39, 40, 41, 42, 43, 44, 9, 10, 11, 48, 49, 50, 51, 52, 53],
    // R
    [0, 1, 51, 3, 4, 48, 6, 7, 45, 11, 14, 17, 10, 13, 16, 9, 12, 15, 18, 19, 2, 21, 22, 5, 24, 25, 8, 27, 28, 20, 30, 31, 23, 33, 34, 26, 36, 37, 38, 39, 40, 41, 42, 43, 44, 35, 46, 47, 32, 49, 50, 29, 52, 53],
    // F
    [0, 1, 2, 3, 4, 5, 9, 12, 15, 29, 10, 11, 28, 13, 14, 27, 16, 17, 20, 23, 26, 19, 22, 25, 18, 21, 24, 38, 41, 44, 30, 31, 32, 33, 34, 35, 36, 37, 8, 39, 40, 7, 42, 43, 6, 45, 46, 47, 48, 49, 50, 51, 52, 53],
    // D
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 51, 52, 53, 18, 19, 20, 21, 22, 23, 15, 16, 17, 29, 32, 35, 28, 31, 34, 27, 30, 33, 36, 37, 38, 39, 40, 41, 24, 25, 26, 45, 46, 47, 48, 49, 50, 42, 43, 44],
    // L
    [18, 1, 2, 21, 4, 5, 24, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 27, 19, 20, 30, 22, 23, 33, 25, 26, 53, 28, 29, 50, 31, 32, 47, 34, 35, 38, 41, 44, 37, 40, 43, 36, 39, 42, 45, 46, 6, 48, 49, 3, 51, 52, 0],
    // B
    [42, 39, 36, 3, 4, 5, 6, 7, 8, 9, 10, 0, 12, 13, 1, 15, 16, 2, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 17, 14, 11, 33, 37, 38, 34, 40, 41, 35, 43, 44, 47, 50, 53, 46, 49, 52, 45, 48, 51],
];

/// Where each facelet goes under each of the 18 actions, built by repeating
/// the quarter turns.
const ACTION_TABLES: [[u8; FACELET_COUNT]; ACTION_COUNT] = {
    let mut tables = [[0; FACELET_COUNT]; ACTION_COUNT];
    let mut a = 0;
    while a < ACTION_COUNT {
        let action = Action::ALL[a];
        let quarter_turn = &QUARTER_TURNS[action.face() as usize];
        let mut i = 0;
        while i < FACELET_COUNT {
            let mut target = i as u8;
            let mut k = 0;
            while k < action.turn().quarter_turns() {
                target = quarter_turn[target as usize];
                k += 1;
            }
            tables[a][i] = target;
            i += 1;
        }
        a += 1;
    }
    tables
};

/// For every position, the original facelet that currently occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceletState([u8; FACELET_COUNT]);

impl FaceletState {
    #[must_use]
    pub const fn solved() -> Self {
        let mut arr = [0; FACELET_COUNT];
        let mut i = 0;
        while i < FACELET_COUNT {
            arr[i] = i as u8;
            i += 1;
        }
        FaceletState(arr)
    }

    pub fn apply(&mut self, action: Action) {
        let table = &ACTION_TABLES[action.index()];
        let mut next = [0; FACELET_COUNT];
        for (&facelet, &target) in self.0.iter().zip(table) {
            next[target as usize] = facelet;
        }
        self.0 = next;
    }

    #[must_use]
    pub fn facelets(&self) -> &[u8; FACELET_COUNT] {
        &self.0
    }

    /// The canonical color at every position.
    #[must_use]
    pub fn colors(&self) -> [u8; FACELET_COUNT] {
        self.0.map(|facelet| FACELET_COLORS[facelet as usize])
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }
}

impl Default for FaceletState {
    fn default() -> Self {
        Self::solved()
    }
}

impl AsRef<[u8]> for FaceletState {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for FaceletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.colors()
            .iter()
            .try_for_each(|&color| write!(f, "{}", Face::ALL[color as usize].letter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::parse_algorithm;

    fn apply_algorithm(algorithm: &str) -> FaceletState {
        let mut state = FaceletState::solved();
        for action in parse_algorithm(algorithm).unwrap() {
            state.apply(action);
        }
        state
    }

    #[test]
    fn test_quarter_turns_are_permutations() {
        for table in ACTION_TABLES {
            let mut seen = [false; FACELET_COUNT];
            for target in table {
                seen[target as usize] = true;
            }
            assert!(seen.iter().all(|&x| x));
        }
    }

    #[test]
    fn test_centers_never_move() {
        for table in ACTION_TABLES {
            for center in [4, 13, 22, 31, 40, 49] {
                assert_eq!(table[center], center as u8);
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        for face in ["U", "R", "F", "D", "L", "B"] {
            assert!(apply_algorithm(&[face; 4].join(" ")).is_solved());
            assert!(!apply_algorithm(face).is_solved());
        }
    }

    #[test]
    fn test_action_then_inverse() {
        for action in Action::ALL {
            let mut state = FaceletState::solved();
            state.apply(action);
            state.apply(action.inverse());
            assert!(state.is_solved());
        }
    }

    #[test]
    fn test_solved_facelet_string() {
        assert_eq!(
            FaceletState::solved().to_string(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
    }

    #[test]
    fn test_facelet_colors() {
        assert_eq!(FACELET_COLORS[0], 0);
        assert_eq!(FACELET_COLORS[8], 0);
        assert_eq!(FACELET_COLORS[9], 1);
        assert_eq!(FACELET_COLORS[53], 5);
        for color in 0..COLOR_COUNT as u8 {
            assert_eq!(FACELET_COLORS.iter().filter(|&&c| c == color).count(), 9);
        }
    }
}
