//! Point-wise prediction.

use anyhow::{bail, Result};
use ndarray::Array2;
use tracing::debug;

use crate::classify::Score;
use crate::encoding::Encoder;
use crate::memory::{AssociativeMemory, HyperVector};

/// Classify every window start on its own and score against `labels[start]`.
///
/// The accuracy denominator is `labels.len()`, not the number of windows, so
/// the last `N - 1` samples always count as misses.
pub fn predict_point<V: HyperVector>(
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

    let mut score = Score {
        total: labels.len(),
        ..Score::default()
    };
    for start in 0..encoder.window_starts(labels.len()) {
        let query = encoder.encode(samples, start)?;
        let predicted = memory.search(&query)? + usize::from(label_offset);
        if predicted == usize::from(labels[start]) {
            score.correct += 1;
        }
        score.evaluated += 1;
    }

    debug!(
        correct = score.correct,
        evaluated = score.evaluated,
        total = score.total,
        "point prediction finished"
    );
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{EncodingMode, Quantizer};
    use crate::learning::train;
    use crate::memory::{BipolarVector, ContinuousItemMemory, IntegerVector, ItemMemory, RealVector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Two well-separated clusters: class 1 ≈ (2, 18), class 2 ≈ (18, 2).
    fn clusters(per_class: usize, seed: u64) -> (Array2<f64>, Vec<u8>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut labels = vec![1u8; per_class];
        labels.extend(std::iter::repeat(2u8).take(per_class));
        let samples = Array2::from_shape_fn((labels.len(), 2), |(t, c)| {
            let centre = match (labels[t], c) {
                (1, 0) | (2, 1) => 2.0,
                _ => 18.0,
            };
            centre + rng.gen_range(-1.5..1.5)
        });
        (samples, labels)
    }

    fn end_to_end<V: HyperVector>() -> Score {
        let items = ItemMemory::<V>::new(2, 10_000, 1);
        let levels = ContinuousItemMemory::<V>::new(2, 10_000, 100);
        let quantizer = Quantizer::with_levels(2).unwrap();
        let enc = Encoder::new(&items, &levels, quantizer, EncodingMode::Spatial).unwrap();

        let (samples, labels) = clusters(50, 42);
        let model = train(&enc, &samples, &labels).unwrap();
        predict_point(&enc, &samples, &labels, &model.memory, model.label_offset).unwrap()
    }

    #[test]
    fn test_end_to_end_synthetic_accuracy() {
        for score in [
            end_to_end::<BipolarVector>(),
            end_to_end::<IntegerVector>(),
            end_to_end::<RealVector>(),
        ] {
            assert!(score.percent() >= 95.0, "score = {}", score);
        }
    }

    #[test]
    fn test_denominator_is_full_length() {
        let items = ItemMemory::<BipolarVector>::new(2, 4_096, 1);
        let levels = ContinuousItemMemory::<BipolarVector>::new(2, 4_096, 100);
        let mode = EncodingMode::Temporal { window: 3 };
        let enc = Encoder::new(&items, &levels, Quantizer::with_levels(2).unwrap(), mode).unwrap();

        let (samples, labels) = clusters(10, 7);
        let model = train(&enc, &samples, &labels).unwrap();
        let score =
            predict_point(&enc, &samples, &labels, &model.memory, model.label_offset).unwrap();

        assert_eq!(score.total, 20);
        assert_eq!(score.evaluated, 18);
        assert!(score.correct <= 18);
        assert!(score.percent() <= 90.0);
    }

    #[test]
    fn test_length_mismatch_fails() {
        let items = ItemMemory::<BipolarVector>::new(2, 256, 1);
        let levels = ContinuousItemMemory::<BipolarVector>::new(2, 256, 100);
        let enc = Encoder::new(
            &items,
            &levels,
            Quantizer::with_levels(2).unwrap(),
            EncodingMode::Spatial,
        )
        .unwrap();
        let (samples, _) = clusters(2, 0);
        let mut am = AssociativeMemory::new();
        am.push(items.lookup(0).unwrap().clone());
        assert!(predict_point(&enc, &samples, &[1, 1], &am, 1).is_err());
    }
}
