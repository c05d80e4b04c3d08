//! Core hypervector abstraction shared by every element representation.
//!
//! The pipeline is written once against [`HyperVector`]; the concrete
//! representation (bipolar, integer, real) is chosen per run through
//! [`Representation`]. Operations never mutate their operands.

use std::fmt;
use std::marker::PhantomData;

use clap::ValueEnum;
use ndarray::Array1;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Element representation of a hypervector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Representation {
    /// `{-1, +1}` elements, majority-vote bundling, Hamming distance.
    #[value(name = "bin")]
    Bipolar,
    /// `i32` elements, raw-sum bundling, cosine distance.
    #[value(name = "int")]
    Integer,
    /// `f32` elements, raw-sum bundling, cosine distance.
    #[value(name = "float")]
    Real,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::Bipolar => "bipolar",
            Representation::Integer => "integer",
            Representation::Real => "real",
        };
        f.write_str(name)
    }
}

/// Capability set of a hypervector: bind, bundle, permute, distance.
///
/// Two vectors taking part in one operation must share a dimension; a
/// mismatch is a programming error and panics. Mixing representations is
/// rejected at compile time since each representation is its own type.
pub trait HyperVector:
    Clone + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned
{
    /// Representation tag of this implementation.
    const REPRESENTATION: Representation;

    /// Draw a pseudo-random vector of dimension `dim` from `rng`.
    fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self;

    /// Number of elements.
    fn dim(&self) -> usize;

    /// Elementwise binding. The result is dissimilar to both inputs and
    /// binding again with `other` approximately recovers `self`.
    fn bind(&self, other: &Self) -> Self;

    /// Cyclic rotation: element `i` moves to `(i + shift) mod D`.
    fn permute(&self, shift: usize) -> Self;

    /// Normalised dissimilarity in `[0, 1]`; `0` means identical.
    fn distance(&self, other: &Self) -> f64;

    /// Copy of `self` with the elements at `positions` negated.
    fn flip(&self, positions: &[usize]) -> Self;

    /// Add this vector's elements into a running sum.
    fn accumulate(&self, sums: &mut Array1<f64>);

    /// Collapse a running sum back into this representation.
    fn from_sums(sums: &Array1<f64>) -> Self;

    /// Similarity in `[-1, 1]`, derived from [`HyperVector::distance`].
    fn similarity(&self, other: &Self) -> f64 {
        1.0 - 2.0 * self.distance(other)
    }

    /// Superpose `vectors` into one vector similar to all of them.
    ///
    /// Panics on an empty slice.
    fn bundle(vectors: &[&Self]) -> Self {
        assert!(!vectors.is_empty(), "bundle requires at least one vector");
        let mut bundler = Bundler::<Self>::new(vectors[0].dim());
        for &v in vectors {
            bundler.add(v);
        }
        bundler.finish()
    }
}

/// Running elementwise superposition.
///
/// Lets callers bundle long exemplar streams without keeping every vector
/// alive. `finish` yields the same result as [`HyperVector::bundle`] over the
/// vectors added so far.
#[derive(Clone, Debug)]
pub struct Bundler<V> {
    sums: Array1<f64>,
    count: usize,
    _marker: PhantomData<V>,
}

impl<V: HyperVector> Bundler<V> {
    /// Create an empty bundler for vectors of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            sums: Array1::zeros(dim),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Superpose one more vector.
    pub fn add(&mut self, vector: &V) {
        assert_same_dim(self.sums.len(), vector.dim(), "bundle");
        vector.accumulate(&mut self.sums);
        self.count += 1;
    }

    /// Number of vectors added.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Has nothing been added yet?
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Dimension of the vectors this bundler accepts.
    pub fn dim(&self) -> usize {
        self.sums.len()
    }

    /// Drop everything added so far.
    pub fn clear(&mut self) {
        self.sums.fill(0.0);
        self.count = 0;
    }

    /// Collapse the running sum. Panics if nothing was added.
    pub fn finish(&self) -> V {
        assert!(self.count > 0, "bundle requires at least one vector");
        V::from_sums(&self.sums)
    }
}

/// Panic unless two operand dimensions agree.
pub(crate) fn assert_same_dim(a: usize, b: usize, op: &str) {
    assert_eq!(a, b, "{op}: dimension mismatch ({a} vs {b})");
}

/// Cyclic right rotation of a dense element array.
pub(crate) fn rotate<T: Clone>(elements: &Array1<T>, shift: usize) -> Array1<T> {
    let n = elements.len();
    if n == 0 {
        return elements.clone();
    }
    let mut out = elements.to_vec();
    out.rotate_right(shift % n);
    Array1::from(out)
}

/// `(1 - cos) / 2` from a dot product and two squared norms.
/// A zero-norm operand is treated as orthogonal.
pub(crate) fn cosine_distance(dot: f64, norm_sq_a: f64, norm_sq_b: f64) -> f64 {
    if norm_sq_a == 0.0 || norm_sq_b == 0.0 {
        return 0.5;
    }
    let cos = dot / (norm_sq_a * norm_sq_b).sqrt();
    ((1.0 - cos) / 2.0).clamp(0.0, 1.0)
}

/// Negate the elements at `positions` in a copy of `elements`.
pub(crate) fn negate_at<T>(elements: &Array1<T>, positions: &[usize]) -> Array1<T>
where
    T: Copy + std::ops::Neg<Output = T>,
{
    let mut out = elements.clone();
    for &p in positions {
        out[p] = -out[p];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::hdm_bipolar::BipolarVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rotate_identity_and_wrap() {
        let a = Array1::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(rotate(&a, 0), a);
        assert_eq!(rotate(&a, 5), a);
        assert_eq!(rotate(&a, 2), Array1::from(vec![4, 5, 1, 2, 3]));
    }

    #[test]
    fn test_cosine_distance_bounds() {
        assert_eq!(cosine_distance(4.0, 4.0, 4.0), 0.0);
        assert_eq!(cosine_distance(-4.0, 4.0, 4.0), 1.0);
        assert_eq!(cosine_distance(0.0, 4.0, 4.0), 0.5);
        assert_eq!(cosine_distance(0.0, 0.0, 4.0), 0.5);
    }

    #[test]
    fn test_bundler_matches_bundle() {
        let mut rng = StdRng::seed_from_u64(7);
        let vs: Vec<BipolarVector> = (0..5).map(|_| BipolarVector::random(512, &mut rng)).collect();
        let refs: Vec<&BipolarVector> = vs.iter().collect();

        let mut bundler = Bundler::new(512);
        for v in &vs {
            bundler.add(v);
        }
        assert_eq!(bundler.len(), 5);
        assert_eq!(bundler.finish(), BipolarVector::bundle(&refs));

        bundler.clear();
        assert!(bundler.is_empty());
        bundler.add(&vs[0]);
        assert_eq!(bundler.finish(), vs[0]);
    }

    #[test]
    #[should_panic(expected = "at least one vector")]
    fn test_bundle_empty_panics() {
        let empty: [&BipolarVector; 0] = [];
        BipolarVector::bundle(&empty);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_bundler_rejects_mismatched_dim() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bundler = Bundler::<BipolarVector>::new(64);
        bundler.add(&BipolarVector::random(32, &mut rng));
    }

    #[test]
    fn test_representation_display() {
        assert_eq!(Representation::Bipolar.to_string(), "bipolar");
        assert_eq!(Representation::Real.to_string(), "real");
    }
}
