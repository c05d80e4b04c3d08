//! Per-subject accuracy results and experiment summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::Score;
use crate::encoding::EncodingMode;
use crate::runtime::pipeline::Evaluation;

/// Outcome of one subject in one experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    /// 1-based subject number.
    pub subject: usize,
    pub score: Score,
    /// Prototypes in the trained memory.
    pub classes: usize,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Test-set stride used for this subject.
    pub downsample: usize,
}

impl SubjectResult {
    pub fn accuracy(&self) -> f64 {
        self.score.percent()
    }
}

/// Accuracy statistics across subjects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub subjects: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// All subject results of one experiment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: String,
    pub mode: EncodingMode,
    pub evaluation: Evaluation,
    pub results: Vec<SubjectResult>,
}

impl ExperimentReport {
    pub fn new(name: &str, mode: EncodingMode, evaluation: Evaluation) -> Self {
        Self {
            name: name.to_string(),
            mode,
            evaluation,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: SubjectResult) {
        self.results.push(result);
    }

    fn accuracies(&self) -> impl Iterator<Item = f64> + '_ {
        self.results.iter().map(SubjectResult::accuracy)
    }

    /// Mean accuracy.
    pub fn mean(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.accuracies().sum::<f64>() / self.results.len() as f64
    }

    /// Sample standard deviation of the accuracy.
    pub fn std_dev(&self) -> f64 {
        if self.results.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self.accuracies().map(|a| (a - mean).powi(2)).sum::<f64>()
            / (self.results.len() - 1) as f64;
        var.sqrt()
    }

    pub fn min(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.accuracies().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.accuracies().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            subjects: self.results.len(),
            mean: self.mean(),
            std_dev: self.std_dev(),
            min: self.min(),
            max: self.max(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.2}% ± {:.2} (min {:.2}%, max {:.2}%, {} subjects)",
            self.mean, self.std_dev, self.min, self.max, self.subjects
        )
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} encoding [{}, {} evaluation]",
            self.name, self.mode, self.evaluation
        )?;
        for r in &self.results {
            writeln!(
                f,
                "Accuracy[{}]: {:.2}% ({}/{}, downsample {})",
                r.subject,
                r.accuracy(),
                r.score.correct,
                r.score.total,
                r.downsample
            )?;
        }
        write!(f, "Summary: {}", self.summary())
    }
}
