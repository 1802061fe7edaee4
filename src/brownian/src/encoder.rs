//! Random color relabeling of puzzle states.
//!
//! Every encoding draws a fresh map from the six face colors into eight color
//! slots and applies it to all states of the group at once, so the colors
//! within one sample stay consistent with each other while the absolute
//! colors vary from sample to sample.

use crate::random::RandomSource;
use cube_core::COLOR_COUNT;

/// The number of color slots a relabeling draws from. Only the first
/// `COLOR_COUNT` entries of each drawn slot permutation are used.
pub const COLOR_SLOTS: usize = 8;

/// Bits per facelet.
pub const CODE_WIDTH: usize = 3;

/// The big-endian binary code of each color slot.
pub const COLOR_CODES: [[u8; CODE_WIDTH]; COLOR_SLOTS] = [
    [0, 0, 0],
    [0, 0, 1],
    [0, 1, 0],
    [0, 1, 1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, 0],
    [1, 1, 1],
];

/// The color slot a code stands for.
#[must_use]
pub fn decode_color(code: [u8; CODE_WIDTH]) -> Option<usize> {
    COLOR_CODES.iter().position(|&c| c == code)
}

/// A finite run of recolored encodings of a group of states. It yields
/// exactly `limit` encodings and cannot be restarted.
#[derive(Debug, Clone)]
pub struct ColorPermutor {
    // Canonical color of every facelet of every state, in group order
    colors: Box<[u8]>,
    remaining: usize,
}

/// Iterator over the encodings of a [`ColorPermutor`], drawing from a borrowed
/// random source.
pub struct Encodings<'r, R: ?Sized> {
    permutor: ColorPermutor,
    rng: &'r mut R,
}

impl ColorPermutor {
    /// `facelet_colors` maps every facelet identity appearing in `states` to
    /// its canonical color.
    ///
    /// # Panics
    ///
    /// If a state holds a facelet identity missing from `facelet_colors`.
    pub fn new<S: AsRef<[u8]>>(states: &[S], facelet_colors: &[u8], limit: usize) -> Self {
        let colors = states
            .iter()
            .flat_map(|state| state.as_ref().iter())
            .map(|&facelet| facelet_colors[facelet as usize])
            .collect();
        Self {
            colors,
            remaining: limit,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// The number of bits in each encoding.
    pub fn encoded_len(&self) -> usize {
        self.colors.len() * CODE_WIDTH
    }

    /// Draw a relabeling and encode the group with it, or `None` once `limit`
    /// encodings have been produced.
    pub fn next_encoding<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<u8>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let slots = rng.permutation(COLOR_SLOTS);
        let relabeling = &slots[..COLOR_COUNT];

        Some(
            self.colors
                .iter()
                .flat_map(|&color| COLOR_CODES[relabeling[color as usize]])
                .collect(),
        )
    }

    pub fn encodings<R: RandomSource + ?Sized>(self, rng: &mut R) -> Encodings<'_, R> {
        Encodings {
            permutor: self,
            rng,
        }
    }
}

impl<R: RandomSource + ?Sized> Iterator for Encodings<'_, R> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        self.permutor.next_encoding(self.rng)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.permutor.remaining, Some(self.permutor.remaining))
    }
}

impl<R: RandomSource + ?Sized> ExactSizeIterator for Encodings<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{FACELET_COLORS, FACELET_COUNT, FaceletState};
    use itertools::Itertools;

    /// Draws reversed permutations, so color `c` lands in slot `7 - c`.
    struct ReversedRandom;

    impl RandomSource for ReversedRandom {
        fn permutation(&mut self, n: usize) -> Vec<usize> {
            (0..n).rev().collect()
        }

        fn below(&mut self, _n: usize) -> usize {
            0
        }
    }

    fn codes(encoding: &[u8]) -> Vec<usize> {
        encoding
            .chunks_exact(CODE_WIDTH)
            .map(|code| decode_color([code[0], code[1], code[2]]).unwrap())
            .collect()
    }

    #[test]
    fn test_codes_are_distinct_and_decode() {
        assert!(COLOR_CODES.iter().all_unique());
        for (slot, &code) in COLOR_CODES.iter().enumerate() {
            assert_eq!(decode_color(code), Some(slot));
        }
        assert_eq!(decode_color([1, 2, 0]), None);
    }

    #[test]
    fn test_yields_exactly_limit() {
        let solved = FaceletState::solved();
        let mut rng = fastrand::Rng::with_seed(3);
        for limit in [0, 1, 5] {
            let mut permutor = ColorPermutor::new(&[solved], &FACELET_COLORS, limit);
            for _ in 0..limit {
                assert!(permutor.next_encoding(&mut rng).is_some());
            }
            assert!(permutor.is_exhausted());
            assert_eq!(permutor.next_encoding(&mut rng), None);
            assert_eq!(permutor.next_encoding(&mut rng), None);
        }
    }

    #[test]
    fn test_deterministic_relabeling() {
        let solved = FaceletState::solved();
        let mut permutor = ColorPermutor::new(&[solved, solved], &FACELET_COLORS, 1);
        assert_eq!(permutor.encoded_len(), 2 * FACELET_COUNT * CODE_WIDTH);

        let encoding = permutor.next_encoding(&mut ReversedRandom).unwrap();
        assert_eq!(encoding.len(), permutor.encoded_len());
        assert_eq!(encoding[..CODE_WIDTH], [1, 1, 1]);
        let expected = FACELET_COLORS
            .iter()
            .map(|&color| 7 - color as usize)
            .collect_vec();
        assert_eq!(codes(&encoding), [expected.clone(), expected].concat());
    }

    #[test]
    fn test_relabeling_is_consistent_within_a_group() {
        let solved = FaceletState::solved();
        let mut turned = solved;
        turned.apply("F".parse().unwrap());
        let mut rng = fastrand::Rng::with_seed(11);

        for encoding in ColorPermutor::new(&[solved, turned], &FACELET_COLORS, 20).encodings(&mut rng)
        {
            let slots = codes(&encoding);
            let (first, second) = slots.split_at(FACELET_COUNT);
            // Six distinct slots, one per face
            let face_slots = first.iter().step_by(9).copied().collect_vec();
            assert!(face_slots.iter().all_unique());
            for (position, &facelet) in turned.facelets().iter().enumerate() {
                assert_eq!(second[position], first[facelet as usize]);
            }
        }
    }

    #[test]
    fn test_encodings_iterator_len() {
        let mut rng = fastrand::Rng::with_seed(0);
        let encodings = ColorPermutor::new(&[FaceletState::solved()], &FACELET_COLORS, 4).encodings(&mut rng);
        assert_eq!(encodings.len(), 4);
        assert_eq!(encodings.count(), 4);
    }
}
