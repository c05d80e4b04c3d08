//! Query-time classification against a trained associative memory.
//!
//! Two strategies share the same encoder and memory:
//! - point-wise: every window start is classified on its own
//! - run-based: each contiguous label run is classified by the single
//!   closest (position, prototype) pair inside it

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod point;
pub mod window;

pub use point::predict_point;
pub use window::{evaluate_by_run, label_runs, predict_window_max};

/// Correct predictions out of a fixed denominator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Predictions matching the ground truth.
    pub correct: usize,
    /// Predictions actually made.
    pub evaluated: usize,
    /// Accuracy denominator.
    pub total: usize,
}

impl Score {
    /// `100 · correct / total`, or 0 for an empty denominator.
    pub fn percent(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    /// `100 · correct / evaluated`.
    pub fn evaluated_percent(&self) -> f64 {
        ratio(self.correct, self.evaluated)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}% ({}/{})",
            self.percent(),
            self.correct,
            self.total
        )
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        100.0 * num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_percentages() {
        let s = Score {
            correct: 3,
            evaluated: 3,
            total: 4,
        };
        assert!((s.percent() - 75.0).abs() < 1e-12);
        assert!((s.evaluated_percent() - 100.0).abs() < 1e-12);
        assert_eq!(s.to_string(), "75.00% (3/4)");
    }

    #[test]
    fn test_empty_score_is_zero() {
        assert_eq!(Score::default().percent(), 0.0);
        assert_eq!(Score::default().evaluated_percent(), 0.0);
    }
}
