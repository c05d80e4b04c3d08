//! Continuous item memory: correlated hypervectors for ordered levels.
//!
//! Level 0 is random. A seeded permutation of the element positions fixes the
//! order in which positions get negated: level `l` negates the first
//! `round(l * (D/2) / (L-1))` of them. Adjacent levels therefore differ in
//! roughly `D / (2(L-1))` positions and the two extreme levels are orthogonal.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::memory::hdm::HyperVector;

/// Maps levels `0..L` to hypervectors whose distance grows with level gap.
#[derive(Clone, Debug)]
pub struct ContinuousItemMemory<V> {
    levels: Vec<V>,
    dim: usize,
    seed: u64,
}

impl<V: HyperVector> ContinuousItemMemory<V> {
    /// Generate `levels` correlated vectors of dimension `dim`.
    pub fn new(levels: usize, dim: usize, seed: u64) -> Self {
        assert!(levels > 0, "continuous item memory needs at least one level");
        assert!(dim > 0, "continuous item memory dimension must be positive");

        let mut rng = StdRng::seed_from_u64(seed);
        let base = V::random(dim, &mut rng);
        let mut order: Vec<usize> = (0..dim).collect();
        order.shuffle(&mut rng);

        let vectors = (0..levels)
            .map(|level| base.flip(&order[..flip_count(level, levels, dim)]))
            .collect();

        Self {
            levels: vectors,
            dim,
            seed,
        }
    }

    /// Vector for `level`.
    pub fn lookup(&self, level: usize) -> Result<&V> {
        self.levels.get(level).ok_or_else(|| {
            anyhow!(
                "level {} out of range for continuous item memory of {} levels",
                level,
                self.levels.len()
            )
        })
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Hypervector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Seed used for generation.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Positions negated at `level`, rounded to nearest.
fn flip_count(level: usize, levels: usize, dim: usize) -> usize {
    if levels < 2 {
        return 0;
    }
    let steps = levels - 1;
    (level * (dim / 2) + steps / 2) / steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::hdm_bipolar::BipolarVector;
    use crate::memory::hdm_integer::IntegerVector;
    use crate::memory::hdm_real::RealVector;

    #[test]
    fn test_flip_count_endpoints() {
        assert_eq!(flip_count(0, 10, 10_000), 0);
        assert_eq!(flip_count(9, 10, 10_000), 5_000);
        assert_eq!(flip_count(0, 1, 10_000), 0);
    }

    #[test]
    fn test_adjacent_levels_are_close() {
        let cim = ContinuousItemMemory::<BipolarVector>::new(10, 10_000, 3);
        let d = cim.lookup(0).unwrap().distance(cim.lookup(1).unwrap());
        assert!(d < 0.1, "d = {}", d);
    }

    #[test]
    fn test_extreme_levels_are_orthogonal() {
        let cim = ContinuousItemMemory::<BipolarVector>::new(10, 10_000, 3);
        let d = cim.lookup(0).unwrap().distance(cim.lookup(9).unwrap());
        assert!((d - 0.5).abs() < 1e-9, "d = {}", d);
    }

    fn assert_monotonic<V: HyperVector>(seed: u64) {
        let cim = ContinuousItemMemory::<V>::new(10, 10_000, seed);
        let base = cim.lookup(0).unwrap();
        let distances: Vec<f64> = (0..10)
            .map(|l| base.distance(cim.lookup(l).unwrap()))
            .collect();
        for pair in distances.windows(2) {
            assert!(pair[0] < pair[1], "distances not increasing: {:?}", distances);
        }
    }

    #[test]
    fn test_monotonic_decorrelation_all_representations() {
        assert_monotonic::<BipolarVector>(1);
        assert_monotonic::<IntegerVector>(2);
        assert_monotonic::<RealVector>(3);
    }

    #[test]
    fn test_spaced_levels_ordering() {
        let cim = ContinuousItemMemory::<BipolarVector>::new(20, 10_000, 5);
        let (i, j, k) = (2, 8, 15);
        let near = cim.lookup(i).unwrap().distance(cim.lookup(j).unwrap());
        let far = cim.lookup(i).unwrap().distance(cim.lookup(k).unwrap());
        assert!(near < far, "near = {}, far = {}", near, far);
    }

    #[test]
    fn test_single_level() {
        let cim = ContinuousItemMemory::<BipolarVector>::new(1, 100, 0);
        assert_eq!(cim.len(), 1);
        assert!(cim.lookup(0).is_ok());
    }

    #[test]
    fn test_lookup_out_of_range() {
        let cim = ContinuousItemMemory::<IntegerVector>::new(10, 100, 0);
        assert!(cim.lookup(10).is_err());
    }
}
