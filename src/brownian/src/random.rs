use itertools::Itertools;

/// The random draws the sample generator needs. Implementations must be
/// deterministic for a fixed seed.
pub trait RandomSource {
    /// A uniformly random ordering of `0..n`.
    fn permutation(&mut self, n: usize) -> Vec<usize>;

    /// A uniformly random integer in `0..n`. `n` must be nonzero.
    fn below(&mut self, n: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut permutation = (0..n).collect_vec();
        self.shuffle(&mut permutation);
        permutation
    }

    fn below(&mut self, n: usize) -> usize {
        self.usize(..n)
    }
}
