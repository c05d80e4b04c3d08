//! Amplitude quantisation into continuous-item-memory levels.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::{AMPLITUDE_MAX, AMPLITUDE_MIN};

/// Map `amplitude` to a level in `0..levels`.
///
/// `[min, max]` is split into `levels` bins of equal width; bin `i` accepts
/// values up to and including `min + step·(i+1)`, and the last bin accepts
/// everything up to `max`. Readings above `max` are clamped to `max`,
/// readings below `min` land in bin 0.
///
/// Bin edges are computed in `f64`. A reading within `f32` rounding of an
/// edge, such as `6.0000001` with a step of 2, therefore bins strictly above
/// that edge even though its `f32` value would sit on it.
///
/// Panics if no bin matches, which only happens for NaN input.
pub fn quantize(amplitude: f64, levels: usize, min: f64, max: f64) -> usize {
    assert!(levels > 0, "quantize requires at least one level");
    let amp = if amplitude > max { max } else { amplitude };
    let step = (max - min) / levels as f64;

    for bin in 0..levels {
        let top = if bin + 1 == levels {
            max
        } else {
            min + step * (bin + 1) as f64
        };
        if amp <= top {
            return bin;
        }
    }

    unreachable!(
        "no amplitude bin for {} in [{}, {}] with {} levels",
        amplitude, min, max, levels
    )
}

/// Quantiser with a validated level count and amplitude range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantizer {
    levels: usize,
    min: f64,
    max: f64,
}

impl Quantizer {
    pub fn new(levels: usize, min: f64, max: f64) -> Result<Self> {
        if levels == 0 {
            bail!("quantizer needs at least one level");
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            bail!("invalid amplitude range [{}, {}]", min, max);
        }
        Ok(Self { levels, min, max })
    }

    /// Quantiser over the nominal EMG range `[0, 20]`.
    pub fn with_levels(levels: usize) -> Result<Self> {
        Self::new(levels, AMPLITUDE_MIN, AMPLITUDE_MAX)
    }

    /// Level for one amplitude reading.
    pub fn level(&self, amplitude: f64) -> usize {
        quantize(amplitude, self.levels, self.min, self.max)
    }

    /// Number of levels.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Amplitude range as `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_known_points() {
        assert_eq!(quantize(20.0, 10, 0.0, 20.0), 9);
        assert_eq!(quantize(25.0, 10, 0.0, 20.0), 9);
        assert_eq!(quantize(0.0, 10, 0.0, 20.0), 0);
        assert_eq!(quantize(2.0, 10, 0.0, 20.0), 0);
        assert_eq!(quantize(2.000_001, 10, 0.0, 20.0), 1);
        assert_eq!(quantize(10.5, 10, 0.0, 20.0), 5);
    }

    #[test]
    fn test_quantize_bins_in_double_precision() {
        // Equal to 6.0 in f32, above it in f64.
        assert_eq!(6.000_000_1f64 as f32, 6.0f32);
        assert_eq!(quantize(6.000_000_1, 10, 0.0, 20.0), 3);
        assert_eq!(quantize(6.0, 10, 0.0, 20.0), 2);
    }

    #[test]
    fn test_quantize_below_min_lands_in_first_bin() {
        assert_eq!(quantize(-3.0, 10, 0.0, 20.0), 0);
    }

    #[test]
    fn test_quantize_top_edge_survives_rounding() {
        // 20 / 7 does not divide evenly; the top value must still bin.
        assert_eq!(quantize(20.0, 7, 0.0, 20.0), 6);
        assert_eq!(quantize(0.3, 3, 0.1, 0.3), 2);
    }

    #[test]
    #[should_panic(expected = "no amplitude bin")]
    fn test_quantize_nan_is_unreachable() {
        quantize(f64::NAN, 10, 0.0, 20.0);
    }

    #[test]
    fn test_quantizer_validation() {
        assert!(Quantizer::new(0, 0.0, 20.0).is_err());
        assert!(Quantizer::new(10, 5.0, 5.0).is_err());
        assert!(Quantizer::new(10, 0.0, f64::INFINITY).is_err());
        let q = Quantizer::with_levels(4).unwrap();
        assert_eq!(q.levels(), 4);
        assert_eq!(q.range(), (0.0, 20.0));
        assert_eq!(q.level(19.0), 3);
    }
}
