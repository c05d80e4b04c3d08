//! Real-valued hypervectors: `f32` elements drawn from a standard normal.
//!
//! Binding multiplies elementwise. Unbinding is approximate:
//! `bind(bind(a, b), b) = a ⊙ b²`, which keeps a cosine of about `1/√3`
//! with `a`. Bundling keeps the raw sum; distance is `(1 - cos) / 2`.

use std::fmt;

use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::memory::hdm::{
    assert_same_dim, cosine_distance, negate_at, rotate, HyperVector, Representation,
};

/// A dense real-valued hypervector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RealVector {
    elements: Array1<f32>,
}

impl RealVector {
    /// Build from explicit elements.
    pub fn from_elements(elements: Vec<f32>) -> Self {
        Self {
            elements: Array1::from(elements),
        }
    }

    /// Element view.
    pub fn elements(&self) -> &Array1<f32> {
        &self.elements
    }

    /// L2 norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    fn dot(&self, other: &RealVector) -> f64 {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .map(|(&a, &b)| f64::from(a) * f64::from(b))
            .sum()
    }
}

impl HyperVector for RealVector {
    const REPRESENTATION: Representation = Representation::Real;

    fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self {
        let elements = (0..dim)
            .map(|_| rng.sample::<f32, _>(StandardNormal))
            .collect::<Vec<f32>>();
        Self::from_elements(elements)
    }

    fn dim(&self) -> usize {
        self.elements.len()
    }

    fn bind(&self, other: &Self) -> Self {
        assert_same_dim(self.dim(), other.dim(), "bind");
        Self {
            elements: &self.elements * &other.elements,
        }
    }

    fn permute(&self, shift: usize) -> Self {
        Self {
            elements: rotate(&self.elements, shift),
        }
    }

    fn distance(&self, other: &Self) -> f64 {
        assert_same_dim(self.dim(), other.dim(), "distance");
        if self.elements == other.elements {
            return 0.0;
        }
        cosine_distance(self.dot(other), self.dot(self), other.dot(other))
    }

    fn flip(&self, positions: &[usize]) -> Self {
        Self {
            elements: negate_at(&self.elements, positions),
        }
    }

    fn accumulate(&self, sums: &mut Array1<f64>) {
        sums.zip_mut_with(&self.elements, |s, &e| *s += f64::from(e));
    }

    fn from_sums(sums: &Array1<f64>) -> Self {
        Self {
            elements: sums.mapv(|s| s as f32),
        }
    }
}

impl fmt::Debug for RealVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RealVector(dim={}, norm={:.3})", self.dim(), self.norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const D: usize = 10_000;

    fn random(seed: u64) -> RealVector {
        RealVector::random(D, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let v = random(11);
        assert_eq!(v.distance(&v), 0.0);
    }

    #[test]
    fn test_unbinding_recovers_approximately() {
        let a = random(1);
        let b = random(2);
        let recovered = a.bind(&b).bind(&b);
        let sim = recovered.similarity(&a);
        // cos ≈ 1/√3 ≈ 0.577
        assert!(sim > 0.45, "sim = {}", sim);
        assert!(recovered.similarity(&random(3)).abs() < 0.05);
    }

    #[test]
    fn test_random_vectors_near_orthogonal() {
        let sim = random(1).similarity(&random(2));
        assert!(sim.abs() < 0.05, "sim = {}", sim);
    }

    #[test]
    fn test_bundle_sums() {
        let a = RealVector::from_elements(vec![0.5, -1.0]);
        let b = RealVector::from_elements(vec![0.25, 2.0]);
        let s = RealVector::bundle(&[&a, &b]);
        assert_eq!(s, RealVector::from_elements(vec![0.75, 1.0]));
    }

    #[test]
    fn test_permute_zero_is_identity() {
        let v = random(4);
        assert_eq!(v.permute(0), v);
    }

    #[test]
    fn test_flip_half_is_orthogonal() {
        let v = random(6);
        let half: Vec<usize> = (0..D / 2).collect();
        let d = v.distance(&v.flip(&half));
        assert!((d - 0.5).abs() < 0.05, "d = {}", d);
    }
}
