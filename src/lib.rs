//! # hdc-emg
//!
//! Hand-gesture recognition from multi-channel EMG with Hyperdimensional
//! Computing.
//!
//! ## Pipeline
//!
//! 1. **Quantise** each channel amplitude into one of `L` levels
//! 2. **Encode** samples by binding channel item vectors to level vectors and
//!    bundling across channels, optionally chaining `N` instants into an N-gram
//! 3. **Train** by bundling every encoded window of a class into a prototype
//! 4. **Classify** by nearest-prototype search, per window or per label run
//!
//! ## Representations
//!
//! Hypervectors come in three flavours behind the
//! [`HyperVector`](memory::HyperVector) trait: bipolar `{-1, +1}`, integer
//! and real-valued (Gaussian).

pub mod classify;
pub mod data;
pub mod encoding;
pub mod learning;
pub mod memory;
pub mod runtime;

/// Experiment-wide constants.
pub mod config {
    /// Hypervector dimension.
    pub const DEFAULT_DIM: usize = 10_000;

    /// Amplitude quantisation levels.
    pub const DEFAULT_LEVELS: usize = 10;

    /// EMG channels per sample record.
    pub const CHANNELS: usize = 4;

    /// Subjects in the dataset, numbered from 1.
    pub const SUBJECTS: usize = 5;

    /// Nominal amplitude range of the recordings.
    pub const AMPLITUDE_MIN: f64 = 0.0;
    pub const AMPLITUDE_MAX: f64 = 20.0;

    /// Share of each class used for training.
    pub const TRAINING_FRACTION: f64 = 0.25;

    /// Gesture labels present in the recordings.
    pub const FIRST_GESTURE: u8 = 1;
    pub const LAST_GESTURE: u8 = 7;

    /// Spatial experiment test-set stride.
    pub const SPATIAL_DOWNSAMPLE: usize = 1;

    /// Temporal experiment N-gram size.
    pub const TEMPORAL_NGRAM: usize = 4;

    /// Temporal experiment test-set stride.
    pub const TEMPORAL_DOWNSAMPLE: usize = 250;

    /// Per-subject stride overrides for the temporal experiment.
    pub const TEMPORAL_SUBJECT_DOWNSAMPLE: &[(usize, usize)] = &[(5, 50)];

    /// Default RNG seed for the item memories.
    pub const DEFAULT_SEED: u64 = 0x5EED_0E30;

    /// Mixed into the seed for the continuous item memory so the two memories
    /// never share a stream.
    pub const LEVEL_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Stream seed for the continuous item memory.
    pub fn level_seed(seed: u64) -> u64 {
        seed.wrapping_add(LEVEL_SEED_OFFSET)
    }
}
