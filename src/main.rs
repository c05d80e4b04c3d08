//! hdc-emg: HDC gesture classification experiments on EMG recordings.
//!
//! Loads `complete{n}.bin` / `labels{n}.bin` for every subject, then runs the
//! spatial and/or temporal experiment and prints per-subject accuracy.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use hdc_emg::config;
use hdc_emg::data::{load_subject, Recording};
use hdc_emg::encoding::EncodingMode;
use hdc_emg::memory::{BipolarVector, HyperVector, IntegerVector, RealVector, Representation};
use hdc_emg::runtime::{run_experiment, Engine, EngineConfig, ExperimentConfig};

/// Which experiments to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Experiment {
    Spatial,
    Temporal,
    Both,
}

/// HDC EMG experiment CLI.
#[derive(Parser, Debug)]
#[command(
    name = "hdc-emg",
    about = "Hyperdimensional computing hand-gesture classification on EMG data",
    version
)]
struct Cli {
    /// Directory holding complete{n}.bin and labels{n}.bin.
    dataset: PathBuf,

    /// Hypervector dimension.
    #[arg(short, long, default_value_t = config::DEFAULT_DIM)]
    dim: usize,

    /// Amplitude quantisation levels.
    #[arg(short, long, default_value_t = config::DEFAULT_LEVELS)]
    levels: usize,

    /// Hypervector element representation.
    #[arg(long, value_enum, default_value_t = Representation::Bipolar)]
    hdc: Representation,

    /// Item memory seed.
    #[arg(long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Channels per sample record.
    #[arg(long, default_value_t = config::CHANNELS)]
    channels: usize,

    /// Number of subjects, loaded as 1..=N.
    #[arg(long, default_value_t = config::SUBJECTS)]
    subjects: usize,

    #[arg(long, default_value_t = config::AMPLITUDE_MIN)]
    amplitude_min: f64,

    #[arg(long, default_value_t = config::AMPLITUDE_MAX)]
    amplitude_max: f64,

    /// Share of each gesture used for training.
    #[arg(long, default_value_t = config::TRAINING_FRACTION)]
    training_fraction: f64,

    /// Experiments to run.
    #[arg(short, long, value_enum, default_value_t = Experiment::Both)]
    experiment: Experiment,

    /// N-gram size of the temporal experiment.
    #[arg(short = 'n', long, default_value_t = config::TEMPORAL_NGRAM)]
    ngram: usize,

    /// Test-set stride of the spatial experiment.
    #[arg(long, default_value_t = config::SPATIAL_DOWNSAMPLE)]
    spatial_downsample: usize,

    /// Test-set stride of the temporal experiment.
    #[arg(long, default_value_t = config::TEMPORAL_DOWNSAMPLE)]
    temporal_downsample: usize,

    /// Temporal stride override as SUBJECT=STRIDE; repeatable.
    /// Defaults to 5=50 when not given.
    #[arg(long, value_parser = parse_override)]
    subject_downsample: Vec<(usize, usize)>,

    /// Directory to write trained associative memories to.
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn parse_override(s: &str) -> Result<(usize, usize), String> {
    let (subject, stride) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SUBJECT=STRIDE, got '{s}'"))?;
    let subject = subject
        .trim()
        .parse()
        .map_err(|e| format!("bad subject in '{s}': {e}"))?;
    let stride = stride
        .trim()
        .parse()
        .map_err(|e| format!("bad stride in '{s}': {e}"))?;
    Ok((subject, stride))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    tracing::info!("hdc-emg v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset directory: {}", cli.dataset.display());

    match cli.hdc {
        Representation::Bipolar => run::<BipolarVector>(&cli),
        Representation::Integer => run::<IntegerVector>(&cli),
        Representation::Real => run::<RealVector>(&cli),
    }
}

fn run<V: HyperVector>(cli: &Cli) -> Result<()> {
    if cli.subjects == 0 {
        bail!("--subjects must be at least 1");
    }

    let engine = Engine::<V>::new(EngineConfig {
        dim: cli.dim,
        levels: cli.levels,
        channels: cli.channels,
        seed: cli.seed,
        amplitude_min: cli.amplitude_min,
        amplitude_max: cli.amplitude_max,
    })?;

    let recordings = load_all(&cli.dataset, cli.subjects, cli.channels)?;

    let mut experiments = Vec::new();
    if matches!(cli.experiment, Experiment::Spatial | Experiment::Both) {
        experiments.push(ExperimentConfig {
            downsample: cli.spatial_downsample,
            training_fraction: cli.training_fraction,
            ..ExperimentConfig::spatial()
        });
    }
    if matches!(cli.experiment, Experiment::Temporal | Experiment::Both) {
        let mut temporal = ExperimentConfig {
            mode: EncodingMode::temporal(cli.ngram)?,
            downsample: cli.temporal_downsample,
            training_fraction: cli.training_fraction,
            ..ExperimentConfig::temporal()
        };
        if !cli.subject_downsample.is_empty() {
            temporal.subject_downsample = cli.subject_downsample.clone();
        }
        experiments.push(temporal);
    }

    for experiment in &experiments {
        tracing::info!(
            "D: {} Levels: {} Encoding: {} Training fraction: {:.0}% Downsample: {}",
            cli.dim,
            cli.levels,
            experiment.mode,
            experiment.training_fraction * 100.0,
            experiment.downsample,
        );
        let report = run_experiment(&engine, experiment, &recordings, cli.save_dir.as_deref())?;
        println!("{report}");
    }

    tracing::info!("Done.");
    Ok(())
}

fn load_all(dir: &Path, subjects: usize, channels: usize) -> Result<Vec<(usize, Recording)>> {
    (1..=subjects)
        .map(|subject| {
            let recording = load_subject(dir, subject, channels)
                .with_context(|| format!("failed to load subject {subject}"))?;
            Ok((subject, recording))
        })
        .collect()
}
