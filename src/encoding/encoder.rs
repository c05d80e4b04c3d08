//! Spatial and temporal (N-gram) encoding of multi-channel samples.
//!
//! - **Spatial**: one instant → `bundle_c( bind(item[c], level[q(x_c)]) )`
//! - **Temporal**: N consecutive instants → `bind_i( permute(spatial_i, i) )`
//!
//! The mode is an explicit value passed with every encoder, never ambient
//! state.

use std::fmt;

use anyhow::{bail, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::encoding::quantize::Quantizer;
use crate::memory::{ContinuousItemMemory, HyperVector, ItemMemory};

/// How a query window is turned into a hypervector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingMode {
    /// One sample per query.
    Spatial,
    /// `window` consecutive samples per query.
    Temporal { window: usize },
}

impl EncodingMode {
    /// Temporal mode; `window` must be positive.
    pub fn temporal(window: usize) -> Result<Self> {
        if window == 0 {
            bail!("temporal window must be at least 1");
        }
        Ok(EncodingMode::Temporal { window })
    }

    /// Samples consumed per query (N).
    pub fn window(&self) -> usize {
        match *self {
            EncodingMode::Spatial => 1,
            EncodingMode::Temporal { window } => window,
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingMode::Spatial => f.write_str("spatial"),
            EncodingMode::Temporal { window } => write!(f, "temporal({}-gram)", window),
        }
    }
}

/// Read-only view over the item memories that turns samples into queries.
#[derive(Clone, Debug)]
pub struct Encoder<'a, V> {
    items: &'a ItemMemory<V>,
    levels: &'a ContinuousItemMemory<V>,
    quantizer: Quantizer,
    mode: EncodingMode,
}

impl<'a, V: HyperVector> Encoder<'a, V> {
    pub fn new(
        items: &'a ItemMemory<V>,
        levels: &'a ContinuousItemMemory<V>,
        quantizer: Quantizer,
        mode: EncodingMode,
    ) -> Result<Self> {
        if items.dim() != levels.dim() {
            bail!(
                "item memory dimension {} does not match continuous item memory dimension {}",
                items.dim(),
                levels.dim()
            );
        }
        if quantizer.levels() != levels.len() {
            bail!(
                "quantizer has {} levels but the continuous item memory has {}",
                quantizer.levels(),
                levels.len()
            );
        }
        if mode.window() == 0 {
            bail!("encoding window must be at least 1");
        }
        Ok(Self {
            items,
            levels,
            quantizer,
            mode,
        })
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Samples consumed per query (N).
    pub fn window(&self) -> usize {
        self.mode.window()
    }

    /// Dimension of the produced hypervectors.
    pub fn dim(&self) -> usize {
        self.items.dim()
    }

    /// Number of channels the item memory covers.
    pub fn channels(&self) -> usize {
        self.items.len()
    }

    /// Number of valid window starts in a sequence of `len` samples.
    pub fn window_starts(&self, len: usize) -> usize {
        (len + 1).saturating_sub(self.window())
    }

    /// Encode a single instant across all channels.
    pub fn spatial(&self, sample: ArrayView1<'_, f64>) -> Result<V> {
        if sample.is_empty() {
            bail!("cannot encode a sample with no channels");
        }
        if sample.len() > self.items.len() {
            bail!(
                "sample has {} channels but the item memory only covers {}",
                sample.len(),
                self.items.len()
            );
        }

        let bound = sample
            .iter()
            .enumerate()
            .map(|(channel, &amplitude)| {
                let level = self.quantizer.level(amplitude);
                Ok(self.items.lookup(channel)?.bind(self.levels.lookup(level)?))
            })
            .collect::<Result<Vec<V>>>()?;

        let refs: Vec<&V> = bound.iter().collect();
        Ok(V::bundle(&refs))
    }

    /// Encode the window starting at `start`.
    pub fn encode(&self, samples: &Array2<f64>, start: usize) -> Result<V> {
        let n = self.window();
        let end = start.saturating_add(n);
        if end > samples.nrows() {
            bail!(
                "window [{}, {}) runs past the end of {} samples",
                start,
                end,
                samples.nrows()
            );
        }

        match self.mode {
            EncodingMode::Spatial => self.spatial(samples.row(start)),
            EncodingMode::Temporal { .. } => {
                let mut gram = self.spatial(samples.row(start))?;
                for offset in 1..n {
                    let shifted = self.spatial(samples.row(start + offset))?.permute(offset);
                    gram = gram.bind(&shifted);
                }
                Ok(gram)
            }
        }
    }
}
