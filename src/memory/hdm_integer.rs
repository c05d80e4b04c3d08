//! Integer hypervectors: `i32` elements seeded in `{-1, +1}`.
//!
//! Binding multiplies elementwise, bundling keeps the raw sum, so bundled
//! prototypes carry vote counts rather than a thresholded sign. Distance is
//! `(1 - cos) / 2`.

use std::fmt;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::memory::hdm::{
    assert_same_dim, cosine_distance, negate_at, rotate, HyperVector, Representation,
};

/// A dense integer hypervector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerVector {
    elements: Array1<i32>,
}

impl IntegerVector {
    /// Build from explicit elements.
    pub fn from_elements(elements: Vec<i32>) -> Self {
        Self {
            elements: Array1::from(elements),
        }
    }

    /// Element view.
    pub fn elements(&self) -> &Array1<i32> {
        &self.elements
    }

    fn dot(&self, other: &IntegerVector) -> i64 {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .map(|(&a, &b)| i64::from(a) * i64::from(b))
            .sum()
    }
}

impl HyperVector for IntegerVector {
    const REPRESENTATION: Representation = Representation::Integer;

    fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self {
        let elements = (0..dim)
            .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
            .collect::<Vec<i32>>();
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
        cosine_distance(
            self.dot(other) as f64,
            self.dot(self) as f64,
            other.dot(other) as f64,
        )
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
            elements: sums.mapv(|s| s.round() as i32),
        }
    }
}

impl fmt::Debug for IntegerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = self.elements.iter().map(|e| e.unsigned_abs()).max().unwrap_or(0);
        write!(f, "IntegerVector(dim={}, peak={})", self.dim(), peak)
    }
}
