//! Item memory: one fixed random hypervector per discrete symbol.
//!
//! Symbols form a finite unordered alphabet (EMG channel indices). Vectors are
//! generated once at construction from per-symbol seeds and never change.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::memory::hdm::HyperVector;

/// Maps symbols `0..K` to independent random hypervectors.
#[derive(Clone, Debug)]
pub struct ItemMemory<V> {
    vectors: Vec<V>,
    dim: usize,
    seed: u64,
}

impl<V: HyperVector> ItemMemory<V> {
    /// Generate `count` vectors of dimension `dim`.
    /// Symbol `i` is drawn from `seed + i`, so the memory is reproducible.
    pub fn new(count: usize, dim: usize, seed: u64) -> Self {
        assert!(dim > 0, "item memory dimension must be positive");
        let vectors = (0..count)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                V::random(dim, &mut rng)
            })
            .collect();
        Self { vectors, dim, seed }
    }

    /// Vector for `symbol`.
    pub fn lookup(&self, symbol: usize) -> Result<&V> {
        self.vectors.get(symbol).ok_or_else(|| {
            anyhow!(
                "symbol {} out of range for item memory of {} entries",
                symbol,
                self.vectors.len()
            )
        })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::hdm_bipolar::BipolarVector;
    use crate::memory::hdm_real::RealVector;

    #[test]
    fn test_item_memory_creation() {
        let im = ItemMemory::<BipolarVector>::new(4, 1000, 42);
        assert_eq!(im.len(), 4);
        assert_eq!(im.dim(), 1000);
        assert_eq!(im.seed(), 42);
        assert!(!im.is_empty());
    }

    #[test]
    fn test_lookup_is_stable() {
        let im = ItemMemory::<BipolarVector>::new(4, 1000, 42);
        let a = im.lookup(2).unwrap().clone();
        let b = im.lookup(2).unwrap();
        assert_eq!(&a, b);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let a = ItemMemory::<RealVector>::new(3, 500, 7);
        let b = ItemMemory::<RealVector>::new(3, 500, 7);
        for s in 0..3 {
            assert_eq!(a.lookup(s).unwrap(), b.lookup(s).unwrap());
        }
    }

    #[test]
    fn test_symbols_are_near_orthogonal() {
        let im = ItemMemory::<BipolarVector>::new(4, 10_000, 1);
        let sim = im.lookup(0).unwrap().similarity(im.lookup(1).unwrap());
        assert!(sim.abs() < 0.05, "sim = {}", sim);
    }

    #[test]
    fn test_different_seeds_are_near_orthogonal() {
        let a = ItemMemory::<BipolarVector>::new(4, 10_000, 1_000);
        let b = ItemMemory::<BipolarVector>::new(4, 10_000, 9_000);
        let sim = a.lookup(0).unwrap().similarity(b.lookup(0).unwrap());
        assert!(sim.abs() < 0.05, "sim = {}", sim);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let im = ItemMemory::<BipolarVector>::new(4, 100, 0);
        let err = im.lookup(4).expect_err("symbol 4 should be out of range");
        assert!(err.to_string().contains("out of range"));
    }
}
