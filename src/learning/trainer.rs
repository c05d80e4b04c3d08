//! One-shot HDC training: bundle per-class exemplars into prototypes.
//!
//! Labels are scanned in order. Every window lying entirely inside a
//! single-label run is encoded and superposed into the current class; a
//! label change closes the class and appends its prototype to the
//! associative memory. Input is expected grouped by class in increasing
//! label order, which is not verified here.

use anyhow::{bail, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::encoding::Encoder;
use crate::memory::{AssociativeMemory, Bundler, HyperVector};

/// Result of a training pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainedModel<V> {
    /// One prototype per class, in label order.
    pub memory: AssociativeMemory<V>,

    /// Smallest training label; prototype `i` stands for `i + label_offset`.
    pub label_offset: u8,

    /// Number of windows bundled into each prototype.
    pub class_sizes: Vec<usize>,
}

impl<V: HyperVector> TrainedModel<V> {
    /// Label represented by prototype `index`.
    pub fn label_for(&self, index: usize) -> usize {
        index + usize::from(self.label_offset)
    }

    /// Number of trained classes.
    pub fn num_classes(&self) -> usize {
        self.memory.len()
    }
}

/// Build an associative memory from labelled training samples.
///
/// Fails if lengths differ, if there are no labels, or if some label has no
/// window fully inside its run.
pub fn train<V: HyperVector>(
    encoder: &Encoder<'_, V>,
    samples: &Array2<f64>,
    labels: &[u8],
) -> Result<TrainedModel<V>> {
    if samples.nrows() != labels.len() {
        bail!(
            "training set has {} samples but {} labels",
            samples.nrows(),
            labels.len()
        );
    }
    let (Some(&first), Some(&label_offset)) = (labels.first(), labels.iter().min()) else {
        bail!("cannot train on an empty label sequence");
    };

    let n = encoder.window();
    let mut memory = AssociativeMemory::new();
    let mut class_sizes = Vec::new();
    let mut current = first;
    let mut bundler = Bundler::<V>::new(encoder.dim());

    let limit = encoder.window_starts(labels.len());
    for start in 0..limit {
        let label = labels[start];
        if label != current {
            close_class(&mut memory, &mut class_sizes, current, &mut bundler)?;
            current = label;
        }
        if labels[start..start + n].iter().all(|&l| l == label) {
            bundler.add(&encoder.encode(samples, start)?);
        }
    }
    // Labels first seen in the last N - 1 samples have no window at all.
    for &label in &labels[limit..] {
        if label != current {
            close_class(&mut memory, &mut class_sizes, current, &mut bundler)?;
            current = label;
        }
    }
    close_class(&mut memory, &mut class_sizes, current, &mut bundler)?;

    info!(
        classes = memory.len(),
        samples = labels.len(),
        mode = %encoder.mode(),
        "trained associative memory"
    );

    Ok(TrainedModel {
        memory,
        label_offset,
        class_sizes,
    })
}

/// Finalise the class being accumulated and reset the bundler.
fn close_class<V: HyperVector>(
    memory: &mut AssociativeMemory<V>,
    class_sizes: &mut Vec<usize>,
    label: u8,
    bundler: &mut Bundler<V>,
) -> Result<()> {
    if bundler.is_empty() {
        bail!(
            "label {} has no training window fully inside a single-label run",
            label
        );
    }
    debug!(label, exemplars = bundler.len(), "closing class prototype");
    memory.push(bundler.finish());
    class_sizes.push(bundler.len());
    bundler.clear();
    Ok(())
}
