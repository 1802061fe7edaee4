//! Tables of canonical paths. Each path leads from the solved state to a
//! representative of some equivalence class; the sample generator replays
//! them but never computes them.

use crate::action::{Action, ParseActionError, parse_algorithm};
use itertools::Itertools;
use log::debug;
use std::{fmt, fs, ops::Index, path::Path, str::FromStr};
use thiserror::Error;

/// 20 move paths to the superflip, which is an antipode of the half turn
/// metric. The rows are one optimal solution under whole cube relabelings
/// and inversion.
const ANTIPODES: &str = "\
U R2 F B R B2 R U2 L B2 R U' D' R2 F R' L B2 U2 F2
F2 U2 B2 L' R F' R2 D U R' B2 L' U2 R' B2 R' B' F' R2 U'
U F2 L R F R2 F U2 B R2 F U' D' F2 L F' B R2 U2 L2
B R2 U D R D2 R B2 L D2 R B' F' R2 U R' L D2 B2 U2
L U2 F B U B2 U L2 D B2 U L' R' U2 F U' D B2 L2 F2
L2 U2 R2 B' F L' F2 D U F' R2 B' U2 F' R2 F' R' L' F2 U'
U2 B2 D2 L' R U' R2 F B R' D2 L' B2 R' D2 R' D' U' R2 B'
F2 L2 B2 D' U F' U2 R L U' B2 D' L2 U' B2 U' B' F' U2 L'
";

#[derive(Error, Debug)]
pub enum PathsError {
    #[error("The canonical path table is empty")]
    EmptyTable,
    #[error("Canonical path {index} is empty")]
    EmptyPath { index: usize },
    #[error("Invalid move on line {line}: {source}")]
    InvalidMove {
        line: usize,
        #[source]
        source: ParseActionError,
    },
    #[error("Could not read the canonical path table: {0}")]
    Io(#[from] std::io::Error),
}

/// A non-empty table of non-empty canonical paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPaths(Box<[Box<[Action]>]>);

impl CanonicalPaths {
    /// # Errors
    ///
    /// If the table or any of its paths is empty.
    pub fn new(paths: Vec<Vec<Action>>) -> Result<Self, PathsError> {
        if paths.is_empty() {
            return Err(PathsError::EmptyTable);
        }
        if let Some(index) = paths.iter().position(Vec::is_empty) {
            return Err(PathsError::EmptyPath { index });
        }
        Ok(Self(paths.into_iter().map(Vec::into_boxed_slice).collect()))
    }

    /// The built-in table of superflip paths.
    #[must_use]
    pub fn antipodes() -> Self {
        // Covered by `test_antipodes_reach_the_superflip`
        ANTIPODES
            .parse()
            .expect("the built-in antipode table is well formed")
    }

    /// Read a table from a text file with one path per line.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or does not contain a valid table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PathsError> {
        let paths: Self = fs::read_to_string(path.as_ref())?.parse()?;
        debug!(
            "Loaded {} canonical paths from {}",
            paths.len(),
            path.as_ref().display()
        );
        Ok(paths)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[Action]> {
        self.0.get(index).map(|path| &**path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Action]> {
        self.0.iter().map(|path| &**path)
    }
}

impl Index<usize> for CanonicalPaths {
    type Output = [Action];

    fn index(&self, index: usize) -> &[Action] {
        &self.0[index]
    }
}

impl FromStr for CanonicalPaths {
    type Err = PathsError;

    /// One path per line. Blank lines and `#` comments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let paths = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or_default().trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line, algorithm)| {
                parse_algorithm(algorithm).map_err(|source| PathsError::InvalidMove { line, source })
            })
            .collect::<Result<Vec<_>, PathsError>>()?;
        Self::new(paths)
    }
}

impl fmt::Display for CanonicalPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in self.iter() {
            writeln!(f, "{}", path.iter().join(" "))?;
        }
        Ok(())
    }
}
