use std::{fmt, str::FromStr};
use thiserror::Error;

/// The number of face turns of a 3x3 in the half turn metric.
pub const ACTION_COUNT: usize = 18;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    Half,
    CounterClockwise,
}

/// One of the 18 face turns. The index is stable: `face * 3 + turn` with
/// faces in `U R F D L B` order and turns in `X X2 X'` order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action(u8);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("Empty move")]
    Empty,
    #[error("Unknown face `{0}`, expected one of U R F D L B")]
    UnknownFace(char),
    #[error("Unknown turn suffix `{suffix}` in move `{token}`")]
    UnknownSuffix { token: String, suffix: String },
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, R, F, D, L, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl Turn {
    pub const ALL: [Self; 3] = [Turn::Clockwise, Turn::Half, Turn::CounterClockwise];

    /// How many clockwise quarter turns this turn is made of.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Half => "2",
            Turn::CounterClockwise => "'",
        }
    }
}

impl Action {
    pub const ALL: [Self; ACTION_COUNT] = {
        let mut arr = [Action(0); ACTION_COUNT];
        let mut i = 0;
        while i < ACTION_COUNT {
            arr[i] = Action(i as u8);
            i += 1;
        }
        arr
    };

    #[must_use]
    pub const fn new(face: Face, turn: Turn) -> Self {
        Action(face as u8 * 3 + turn as u8)
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Action::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn face(self) -> Face {
        Face::ALL[(self.0 / 3) as usize]
    }

    #[must_use]
    pub const fn turn(self) -> Turn {
        Turn::ALL[(self.0 % 3) as usize]
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        let turn = match self.turn() {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::Half => Turn::Half,
            Turn::CounterClockwise => Turn::Clockwise,
        };
        Action::new(self.face(), turn)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face().letter(), self.turn().suffix())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseActionError::Empty)?;
        let face = Face::from_letter(letter).ok_or(ParseActionError::UnknownFace(letter))?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "2" | "2'" => Turn::Half,
            "'" => Turn::CounterClockwise,
            suffix => {
                return Err(ParseActionError::UnknownSuffix {
                    token: s.to_owned(),
                    suffix: suffix.to_owned(),
                });
            }
        };
        Ok(Action::new(face, turn))
    }
}

/// Parse a whitespace separated move sequence such as `"R U R' U'"`.
///
/// # Errors
///
/// If any of the moves is not a face turn in standard notation.
pub fn parse_algorithm(algorithm: &str) -> Result<Vec<Action>, ParseActionError> {
    algorithm.split_whitespace().map(str::parse).collect()
}
