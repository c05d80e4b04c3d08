//! Associative memory: class prototypes with nearest-neighbour search.
//!
//! Index `i` holds the prototype of the `i`-th class seen in label order
//! during training. Translating an index back to a label is the caller's job.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::memory::hdm::{assert_same_dim, HyperVector};

/// Ordered collection of class prototypes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssociativeMemory<V> {
    prototypes: Vec<V>,
}

impl<V: HyperVector> AssociativeMemory<V> {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self {
            prototypes: Vec::new(),
        }
    }

    /// Append a prototype at the next index.
    pub fn push(&mut self, prototype: V) {
        if let Some(first) = self.prototypes.first() {
            assert_same_dim(first.dim(), prototype.dim(), "associative memory push");
        }
        self.prototypes.push(prototype);
    }

    /// Index of the prototype closest to `query`. Ties go to the lowest index.
    pub fn search(&self, query: &V) -> Result<usize> {
        Ok(self.search_with_distance(query)?.0)
    }

    /// Like [`AssociativeMemory::search`], also returning the winning distance.
    pub fn search_with_distance(&self, query: &V) -> Result<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, prototype) in self.prototypes.iter().enumerate() {
            let distance = query.distance(prototype);
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((index, distance)),
            }
        }
        match best {
            Some(hit) => Ok(hit),
            None => bail!("cannot search an empty associative memory"),
        }
    }

    /// Number of stored prototypes.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Are there no prototypes yet?
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Prototype at `index`.
    pub fn get(&self, index: usize) -> Option<&V> {
        self.prototypes.get(index)
    }

    /// Prototypes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.prototypes.iter()
    }

    /// Serialise prototypes to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).context("failed to serialise associative memory")
    }

    /// Deserialise prototypes from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).context("failed to deserialise associative memory")
    }
}

impl<V: HyperVector> Default for AssociativeMemory<V> {
    fn default() -> Self {
        Self::new()
    }
}
