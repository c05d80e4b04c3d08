//! Bipolar hypervectors: elements in `{-1, +1}`.
//!
//! Binding is elementwise multiplication (exactly self-inverse), bundling is a
//! per-element majority vote with ties resolved to `+1`, and distance is the
//! normalised Hamming distance.

use std::fmt;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::memory::hdm::{assert_same_dim, negate_at, rotate, HyperVector, Representation};

/// A dense bipolar hypervector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BipolarVector {
    elements: Array1<i8>,
}

impl BipolarVector {
    /// Build from explicit elements. Panics on any value other than ±1.
    pub fn from_elements(elements: Vec<i8>) -> Self {
        assert!(
            elements.iter().all(|&e| e == 1 || e == -1),
            "bipolar elements must be -1 or +1"
        );
        Self {
            elements: Array1::from(elements),
        }
    }

    /// Element view.
    pub fn elements(&self) -> &Array1<i8> {
        &self.elements
    }

    /// Number of differing positions.
    pub fn hamming_distance(&self, other: &BipolarVector) -> usize {
        assert_same_dim(self.dim(), other.dim(), "hamming_distance");
        self.elements
            .iter()
            .zip(other.elements.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Number of `+1` elements.
    pub fn positives(&self) -> usize {
        self.elements.iter().filter(|&&e| e > 0).count()
    }
}

impl HyperVector for BipolarVector {
    const REPRESENTATION: Representation = Representation::Bipolar;

    fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self {
        let elements = (0..dim)
            .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
            .collect::<Vec<i8>>();
        Self {
            elements: Array1::from(elements),
        }
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
        if self.dim() == 0 {
            return 0.0;
        }
        self.hamming_distance(other) as f64 / self.dim() as f64
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
            elements: sums.mapv(|s| if s >= 0.0 { 1 } else { -1 }),
        }
    }
}

impl fmt::Debug for BipolarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BipolarVector(dim={}, positives={})",
            self.dim(),
            self.positives()
        )
    }
}
