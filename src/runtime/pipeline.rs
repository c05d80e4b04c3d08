//! Experiment pipeline: recording in → per-subject accuracy out.
//!
//! For every subject:
//! 1. Downsample the recording into the test set
//! 2. Take the leading fraction of each class as the training set
//! 3. Train an associative memory with the experiment's encoding mode
//! 4. Evaluate on the full test set, point-wise or per label run
//!
//! The item memories are generated once per [`Engine`] and shared read-only
//! by every experiment and subject.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::{evaluate_by_run, predict_point};
use crate::config;
use crate::data::{downsample, training_split, Recording};
use crate::encoding::{Encoder, EncodingMode, Quantizer};
use crate::learning::{train, TrainedModel};
use crate::memory::{ContinuousItemMemory, HyperVector, ItemMemory};
use crate::runtime::report::{ExperimentReport, SubjectResult};

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hypervector dimension.
    pub dim: usize,

    /// Quantisation levels.
    pub levels: usize,

    /// Channels per sample.
    pub channels: usize,

    /// Seed for the item memories.
    pub seed: u64,

    /// Amplitude range mapped onto the levels.
    pub amplitude_min: f64,
    pub amplitude_max: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dim: config::DEFAULT_DIM,
            levels: config::DEFAULT_LEVELS,
            channels: config::CHANNELS,
            seed: config::DEFAULT_SEED,
            amplitude_min: config::AMPLITUDE_MIN,
            amplitude_max: config::AMPLITUDE_MAX,
        }
    }
}

/// Item memories and quantiser for one representation.
pub struct Engine<V> {
    pub config: EngineConfig,
    items: ItemMemory<V>,
    levels: ContinuousItemMemory<V>,
    quantizer: Quantizer,
}

impl<V: HyperVector> Engine<V> {
    /// Generate the item memories.
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.dim == 0 {
            bail!("hypervector dimension must be positive");
        }
        if config.channels == 0 {
            bail!("at least one channel is required");
        }
        let quantizer = Quantizer::new(config.levels, config.amplitude_min, config.amplitude_max)?;
        let items = ItemMemory::new(config.channels, config.dim, config.seed);
        let levels =
            ContinuousItemMemory::new(config.levels, config.dim, config::level_seed(config.seed));

        let representation = V::REPRESENTATION;
        info!(
            representation = %representation,
            dim = config.dim,
            levels = config.levels,
            channels = config.channels,
            "generated item memories"
        );
        Ok(Self {
            config,
            items,
            levels,
            quantizer,
        })
    }

    /// Encoder over this engine's memories.
    pub fn encoder(&self, mode: EncodingMode) -> Result<Encoder<'_, V>> {
        Encoder::new(&self.items, &self.levels, self.quantizer, mode)
    }
}

/// How a trained memory is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Every window start on its own.
    Point,
    /// One decision per contiguous label run.
    Runs,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Point => f.write_str("point"),
            Evaluation::Runs => f.write_str("run"),
        }
    }
}

/// One experiment: an encoding mode, its test-set stride and its scoring.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    pub name: String,
    pub mode: EncodingMode,
    pub evaluation: Evaluation,

    /// Test-set stride.
    pub downsample: usize,

    /// `(subject, stride)` overrides of `downsample`.
    pub subject_downsample: Vec<(usize, usize)>,

    /// Share of each class used for training.
    pub training_fraction: f64,

    /// Labels the training split draws from.
    pub classes: RangeInclusive<u8>,
}

impl ExperimentConfig {
    /// Single-sample encoding, point-wise scoring.
    pub fn spatial() -> Self {
        Self {
            name: "spatial".to_string(),
            mode: EncodingMode::Spatial,
            evaluation: Evaluation::Point,
            downsample: config::SPATIAL_DOWNSAMPLE,
            subject_downsample: Vec::new(),
            training_fraction: config::TRAINING_FRACTION,
            classes: config::FIRST_GESTURE..=config::LAST_GESTURE,
        }
    }

    /// N-gram encoding, run-based scoring.
    pub fn temporal() -> Self {
        Self {
            name: "temporal".to_string(),
            mode: EncodingMode::Temporal {
                window: config::TEMPORAL_NGRAM,
            },
            evaluation: Evaluation::Runs,
            downsample: config::TEMPORAL_DOWNSAMPLE,
            subject_downsample: config::TEMPORAL_SUBJECT_DOWNSAMPLE.to_vec(),
            training_fraction: config::TRAINING_FRACTION,
            classes: config::FIRST_GESTURE..=config::LAST_GESTURE,
        }
    }

    /// Stride for `subject`, honouring overrides.
    pub fn downsample_for(&self, subject: usize) -> usize {
        self.subject_downsample
            .iter()
            .rev()
            .find(|&&(s, _)| s == subject)
            .map_or(self.downsample, |&(_, stride)| stride)
    }
}

/// Train and evaluate one subject.
pub fn run_subject<V: HyperVector>(
    engine: &Engine<V>,
    experiment: &ExperimentConfig,
    subject: usize,
    recording: &Recording,
) -> Result<(SubjectResult, TrainedModel<V>)> {
    let stride = experiment.downsample_for(subject);
    let test = downsample(recording, stride)?;
    let train_set = training_split(&test, experiment.training_fraction, experiment.classes.clone())?;
    let encoder = engine.encoder(experiment.mode)?;

    let model = train(&encoder, train_set.samples(), train_set.labels())?;
    let score = match experiment.evaluation {
        Evaluation::Point => predict_point(
            &encoder,
            test.samples(),
            test.labels(),
            &model.memory,
            model.label_offset,
        )?,
        Evaluation::Runs => evaluate_by_run(
            &encoder,
            test.samples(),
            test.labels(),
            &model.memory,
            model.label_offset,
        )?,
    };

    info!(
        experiment = %experiment.name,
        subject,
        accuracy = score.percent(),
        correct = score.correct,
        total = score.total,
        "subject evaluated"
    );

    let result = SubjectResult {
        subject,
        score,
        classes: model.num_classes(),
        train_samples: train_set.len(),
        test_samples: test.len(),
        downsample: stride,
    };
    Ok((result, model))
}

/// Run one experiment over `(subject, recording)` pairs, in order.
///
/// With `save_dir`, each subject's associative memory is written to
/// `{name}_subject{n}.am` there.
pub fn run_experiment<V: HyperVector>(
    engine: &Engine<V>,
    experiment: &ExperimentConfig,
    recordings: &[(usize, Recording)],
    save_dir: Option<&Path>,
) -> Result<ExperimentReport> {
    info!(
        experiment = %experiment.name,
        mode = %experiment.mode,
        evaluation = %experiment.evaluation,
        training_fraction = experiment.training_fraction,
        downsample = experiment.downsample,
        "starting experiment"
    );

    if let Some(dir) = save_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut report = ExperimentReport::new(&experiment.name, experiment.mode, experiment.evaluation);
    for (subject, recording) in recordings {
        let (result, model) = run_subject(engine, experiment, *subject, recording)
            .with_context(|| format!("{} experiment, subject {}", experiment.name, subject))?;

        if let Some(dir) = save_dir {
            let path = dir.join(format!("{}_subject{}.am", experiment.name, subject));
            std::fs::write(&path, model.memory.to_bytes()?)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        report.record(result);
    }

    info!(experiment = %experiment.name, summary = %report.summary(), "experiment finished");
    Ok(report)
}
