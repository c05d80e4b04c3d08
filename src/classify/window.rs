//! Run-based evaluation with a global argmin over each run.
//!
//! A run is a maximal stretch of equal adjacent labels. Every window position
//! in the run is encoded and compared with every prototype; the prototype of
//! the single closest pair wins the run. Position encodings and searches run
//! in parallel on rayon, the reduction is sequential and deterministic.

use std::cmp::Ordering;
use std::ops::Range;

use anyhow::{bail, Result};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::classify::Score;
use crate::encoding::Encoder;
use crate::memory::{AssociativeMemory, HyperVector};

/// Best prototype match at one window position.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    distance: f64,
    position: usize,
    index: usize,
}

impl Candidate {
    /// Smaller distance first, then earlier position, then lower index.
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.position.cmp(&other.position))
            .then(self.index.cmp(&other.index))
    }
}

/// Prototype index with the smallest distance over all positions in
/// `[start, stop)` and all prototypes.
pub fn predict_window_max<V: HyperVector>(
    encoder: &Encoder<'_, V>,
    samples: &Array2<f64>,
    start: usize,
    stop: usize,
    memory: &AssociativeMemory<V>,
) -> Result<usize> {
    if start >= stop {
        bail!("empty prediction window [{}, {})", start, stop);
    }
    let limit = encoder.window_starts(samples.nrows());
    if stop > limit {
        bail!(
            "prediction window [{}, {}) needs positions past the last full window start {}",
            start,
            stop,
            limit
        );
    }
    if memory.is_empty() {
        bail!("cannot search an empty associative memory");
    }

    let candidates = (start..stop)
        .into_par_iter()
        .map(|position| -> Result<Candidate> {
            let query = encoder.encode(samples, position)?;
            let (index, distance) = memory.search_with_distance(&query)?;
            Ok(Candidate {
                distance,
                position,
                index,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let best = candidates
        .into_iter()
        .min_by(|a, b| a.rank(b))
        .map(|c| c.index);
    match best {
        Some(index) => Ok(index),
        None => unreachable!("non-empty window produced no candidates"),
    }
}

/// Maximal runs of equal adjacent labels, as index ranges.
pub fn label_runs(labels: &[u8]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for chunk in labels.chunk_by(|a, b| a == b) {
        runs.push(start..start + chunk.len());
        start += chunk.len();
    }
    runs
}

/// Classify each label run as a whole and score correct runs.
///
/// A run gets `max(run_len, N)` positions from its start, cut back to the
/// last full window. Runs with no full window at all are skipped and do not
/// count toward the denominator.
pub fn evaluate_by_run<V: HyperVector>(
    encoder: &Encoder<'_, V>,
    samples: &Array2<f64>,
    labels: &[u8],
    memory: &AssociativeMemory<V>,
    label_offset: u8,
) -> Result<Score> {
    if samples.nrows() != labels.len() {
        bail!(
            "query set has {} samples but {} labels",
            samples.nrows(),
            labels.len()
        );
    }

    let limit = encoder.window_starts(labels.len());
    let mut score = Score::default();
    let mut skipped = 0usize;

    for run in label_runs(labels) {
        let width = run.len().max(encoder.window());
        let stop = (run.start + width).min(limit);
        if stop <= run.start {
            skipped += 1;
            continue;
        }

        let index = predict_window_max(encoder, samples, run.start, stop, memory)?;
        let predicted = index + usize::from(label_offset);
        let actual = usize::from(labels[run.start]);
        if predicted == actual {
            score.correct += 1;
        }
        score.evaluated += 1;
        debug!(
            start = run.start,
            len = run.len(),
            actual,
            predicted,
            "classified label run"
        );
    }
    score.total = score.evaluated;

    if skipped > 0 {
        warn!(skipped, "label runs too close to the end to encode a full window");
    }
    Ok(score)
}
