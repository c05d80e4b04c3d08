//! Test-set downsampling and per-class training split.

use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use tracing::debug;

use crate::data::dataset::Recording;

/// Keep every `stride`-th record, starting with the first.
pub fn downsample(recording: &Recording, stride: usize) -> Result<Recording> {
    if stride == 0 {
        bail!("downsample stride must be at least 1");
    }
    let indices: Vec<usize> = (0..recording.len()).step_by(stride).collect();
    Ok(recording.select(&indices))
}

/// Leading `floor(count · fraction)` records of each class, grouped by class
/// in ascending label order.
///
/// `count` is the number of records with that label in the whole recording.
/// The result is sorted by class, as the trainer expects.
pub fn training_split(
    recording: &Recording,
    fraction: f64,
    classes: RangeInclusive<u8>,
) -> Result<Recording> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        bail!("training fraction {} is outside (0, 1]", fraction);
    }

    let labels = recording.labels();
    let mut indices = Vec::new();
    for class in classes {
        let count = labels.iter().filter(|&&l| l == class).count();
        let take = (count as f64 * fraction).floor() as usize;
        indices.extend(
            labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == class)
                .map(|(i, _)| i)
                .take(take),
        );
        debug!(class, count, take, "training split");
    }
    Ok(recording.select(&indices))
}
